//! snpflank - nearest flanking gene annotation for SNP markers.
//!
//! This library builds a strand-aware, per-contig gene position index from a
//! `seq_gene.md` style annotation table and resolves, for every marker, the
//! genes closest to it on the 5' and 3' side.
//!
//! # Features
//!
//! - Read plain or gzip-compressed gene databases and marker lists
//! - Two-pass ingestion: primary assembly first, then the alternate
//!   chromosome 7 assembly for genes the primary assembly lacks
//! - Strand-dependent assignment of 5'/3' gene ends
//! - Zero distance for markers inside a gene's flank-extended window
//! - Nearest-gene (with ties) or fixed-threshold candidate retention
//!
//! # Example
//!
//! ```ignore
//! use snpflank::config::Config;
//! use snpflank::index::build_index;
//! use snpflank::matcher::{annotate_markers, Nearest};
//! use snpflank::parser::{ExcludedMarkers, MarkerReader};
//! use std::path::Path;
//!
//! let config = Config::default();
//! let index = build_index(Path::new("seq_gene.md.gz"), &config.assembly, config.coordinate_mode)?;
//! let markers = MarkerReader::new(Path::new("markers.txt"))?;
//! let excluded = ExcludedMarkers::new();
//! let summary = annotate_markers(&index, &excluded, Nearest, markers, &mut std::io::stdout())?;
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod types;

pub use config::Config;
pub use error::RecordError;
pub use index::{GenomicAnnotationIndex, OrientedGeneSets};
pub use parser::{ExcludedMarkers, MarkerReader};
pub use types::{AssemblySource, Chromosome, GeneInfo, Marker, Side, Strand};

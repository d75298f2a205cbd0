//! countrydb-cli
//! =============
//!
//! Command-line interface for the `countrydb-core` country directory.
//!
//! This crate primarily provides a binary (`countrydb`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install countrydb-cli
//! countrydb --help
//! countrydb countries --region Europe --sort population-desc
//! countrydb country DEU
//! countrydb --input snapshot.json.gz languages
//! ```
//!
//! For programmatic access use the [`countrydb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

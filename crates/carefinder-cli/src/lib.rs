//! carefinder-cli
//! ==============
//!
//! Command-line interface for the `carefinder-core` healthcare facility
//! finder.
//!
//! This crate primarily provides a binary (`carefinder`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install carefinder-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! carefinder --help
//! carefinder cities
//! carefinder facilities --city Peshawar --ownership government
//! carefinder --api-url http://localhost:8000 watch
//! ```
//!
//! For programmatic access to the load controller, filters and view
//! models, use the [`carefinder-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.

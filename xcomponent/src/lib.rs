//! XComponent - component list and component manifest tooling for the
//! X-Plane mobile CDN.
//!
//! The mobile app downloads its content as *components*. Two text formats
//! describe them:
//!
//! - `component_list.txt` ([`component`]) - every component, its CDN pool,
//!   package path and the manifest versions that apply to it
//! - `directory.txt` ([`manifest`]) - per component, every installed file,
//!   its hash, its containing ZIP if any, and the last manifest version that
//!   touched it
//!
//! Both parsers work on text only. Retrieval goes through the
//! [`source::TextSource`] seam.
//!
//! Supporting modules:
//!
//! - [`library`] - scenery `library.txt` export indexes
//! - [`config`] - INI configuration file
//! - [`logging`] - `tracing` subscriber setup

pub mod component;
pub mod config;
pub mod library;
pub mod logging;
pub mod manifest;
pub mod source;

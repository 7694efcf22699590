//! Component list types and parsing.
//!
//! The component list (`component_list.txt`) advertises every downloadable
//! component of the mobile app: where it lives on the CDN, which manifest
//! versions apply to it, and which app versions support it.
//!
//! - [`ComponentBlock`] - one six-line `COMPONENT` record
//! - [`parse_component_list`] - every block of a list, in document order
//! - [`parse_component_list_version`] - the list's own version number
//! - [`component_versions`] - name to manifest version range lookup
//! - [`CdnServer`] - CDN pool helpers

mod block;
mod cdn;
mod error;
mod list;

pub use block::{ComponentBlock, VersionRange, COMPONENT_KEYWORD, COMPONENT_NAME_PREFIX};
pub use cdn::{CdnServer, CDN_CONTENT_ROOT};
pub use error::{ComponentError, ComponentResult};
pub use list::{
    component_versions, parse_component_list, parse_component_list_version, COMPONENTS_MARKER,
    END_OF_LIST_MARKER,
};

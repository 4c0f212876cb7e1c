//! Editor-facing output built from the registered schemas.
//!
//! - [`toolbox_xml`] – Toolbox category XML listing the registered blocks.

pub mod toolbox_xml;

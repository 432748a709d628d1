//! Response formats and signature algorithms

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Serialization format negotiated for the response body.
///
/// `Json` is the default for new clients. `Php` is the legacy native
/// serialization: responses in it are decoded best-effort, the client never
/// emits it. `Xml` is decoded best-effort and lossy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Php,
    Xml,
}

impl_wire_name_conversions!(Format {
    Json => "json",
    Php => "php",
    Xml => "xml",
});

/// Hash used to turn the signature string into a signature.
///
/// `Md5` is what the remote service verifies. `Sha256` is protocol breaking
/// and only meaningful for deployments that control both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl_wire_name_conversions!(SignatureAlgorithm {
    Md5 => "md5",
    Sha256 => "sha256",
});

//! Canonical parameter signature.
//!
//! The signature is the hash of the secret followed by every parameter value,
//! sorted byte-wise, with no separators:
//!
//! ```text
//! md5(secret + sort(values(params - "sig")).join(""))
//! ```
//!
//! Keys never take part, so two maps with the same values in a different
//! insertion order sign identically. Nested maps and lists contribute their
//! leaf values only.

use md5::{Digest, Md5};
use sailthru_domain::constants::PARAM_SIG;
use sailthru_domain::{ParamValue, ParameterMap, SignatureAlgorithm};
use sha2::Sha256;

/// Sign `params` with MD5, the algorithm the remote service verifies.
pub fn sign(params: &ParameterMap, secret: &str) -> String {
    sign_with(params, secret, SignatureAlgorithm::Md5)
}

/// Sign `params` with an explicit hash algorithm.
pub fn sign_with(params: &ParameterMap, secret: &str, algorithm: SignatureAlgorithm) -> String {
    let input = signature_string(params, secret);
    match algorithm {
        SignatureAlgorithm::Md5 => hex::encode(Md5::digest(input.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
    }
}

/// The string that gets hashed: secret followed by the sorted values.
///
/// Contains the secret; never log it.
pub fn signature_string(params: &ParameterMap, secret: &str) -> String {
    let values = signature_values(params);
    let mut input = String::with_capacity(secret.len() + values.iter().map(String::len).sum::<usize>());
    input.push_str(secret);
    for value in &values {
        input.push_str(value);
    }
    input
}

/// Leaf values of `params` (top-level `sig` excluded), sorted byte-wise.
pub fn signature_values(params: &ParameterMap) -> Vec<String> {
    let mut values = Vec::new();
    for (key, value) in params.iter() {
        if key == PARAM_SIG {
            continue;
        }
        collect_values(value, &mut values);
    }
    values.sort_unstable();
    values
}

fn collect_values(value: &ParamValue, out: &mut Vec<String>) {
    match value {
        ParamValue::Map(map) => {
            for (_, nested) in map.iter() {
                collect_values(nested, out);
            }
        }
        ParamValue::List(items) => {
            for item in items {
                collect_values(item, out);
            }
        }
        scalar => {
            if let Some(text) = scalar.scalar_string() {
                out.push(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "s3cr3t";

    fn welcome() -> ParameterMap {
        ParameterMap::new().with("email", "a@b.com").with("template", "welcome")
    }

    #[test]
    fn empty_map_hashes_the_secret_alone() {
        assert_eq!(sign(&ParameterMap::new(), SECRET), "a4d80eac9ab26a4a2da04125bc2c096a");
        assert_eq!(signature_string(&ParameterMap::new(), SECRET), SECRET);
    }

    #[test]
    fn known_signature_for_simple_map() {
        assert_eq!(signature_string(&welcome(), SECRET), "s3cr3ta@b.comwelcome");
        assert_eq!(sign(&welcome(), SECRET), "b9f0bdce0da0be5146241343366f0d81");
    }

    #[test]
    fn signature_is_stable_and_value_sensitive() {
        let first = sign(&welcome(), SECRET);
        assert_eq!(first, sign(&welcome(), SECRET));

        let changed = welcome().with("template", "welcome2");
        assert_eq!(sign(&changed, SECRET), "d90437e83bd1365df6f17d002d5842e7");
        assert_ne!(sign(&changed, SECRET), first);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let reversed = ParameterMap::new().with("template", "welcome").with("email", "a@b.com");
        assert_eq!(sign(&reversed, SECRET), sign(&welcome(), SECRET));
    }

    #[test]
    fn existing_sig_is_ignored() {
        let with_sig = welcome().with("sig", "stale-signature");
        assert_eq!(sign(&with_sig, SECRET), sign(&welcome(), SECRET));
    }

    #[test]
    fn nested_maps_contribute_values_not_keys() {
        let vars = ParameterMap::new().with("name", "Bob").with("age", 30);
        let params = ParameterMap::new().with("vars", vars).with("email", "x@y.z");

        assert_eq!(signature_values(&params), vec!["30", "Bob", "x@y.z"]);
        assert_eq!(sign(&params, SECRET), "916b4a7b9f0859b8117f95bc06dd9e87");
    }

    #[test]
    fn nested_sig_keys_are_signed() {
        let nested = ParameterMap::new().with("sig", "inner");
        let params = ParameterMap::new().with("vars", nested);
        assert_eq!(signature_values(&params), vec!["inner"]);
    }

    #[test]
    fn lists_and_scalars_are_flattened() {
        let item = ParameterMap::new().with("qty", 2).with("price", 12.5).with("gift", true);
        let params = ParameterMap::new()
            .with("items", vec![ParamValue::from(item)])
            .with("tags", vec!["blue", "red"])
            .with("note", ParamValue::Null);

        assert_eq!(signature_values(&params), vec!["", "1", "12.5", "2", "blue", "red"]);
    }

    #[test]
    fn sha256_is_opt_in() {
        assert_eq!(
            sign_with(&welcome(), SECRET, SignatureAlgorithm::Sha256),
            "b6754ae566b6d33230bcd7317133eb6f2fad24c65f132495d1dfd581c7f79c89"
        );
        assert_eq!(sign_with(&welcome(), SECRET, SignatureAlgorithm::Md5), sign(&welcome(), SECRET));
    }
}

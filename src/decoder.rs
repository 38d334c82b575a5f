// This file is part of the terraform-provider-sources project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Discrimination of `oneOf` payloads
//!
//! The API returns parameters as a bare JSON object that may be any of the
//! registered shapes. Every shape is tried in turn: the payload must decode, must
//! not be empty, must pass the shape validation and must carry the `type` the
//! shape expects. Exactly one shape has to survive, ambiguity is an error.

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;

use crate::error::{Error, Result};

/// A decoded candidate, as seen by the discriminator
pub trait Discriminable {
    /// Value of the `type` field, if any
    fn type_tag(&self) -> Option<&str>;

    /// Whether nothing at all was decoded
    fn is_empty(&self) -> bool;

    /// Shape-level validation: required fields and formats
    fn check(&self) -> std::result::Result<(), String>;
}

/// One of the shapes a payload may take
pub trait Shape<T: Discriminable> {
    fn name(&self) -> &str;

    /// Constant the `type` field must hold for this shape
    fn expected_type(&self) -> String;

    fn decode(&self, raw: &str) -> serde_json::Result<T>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Reject candidates that decoded without any field
    pub reject_empty: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self { reject_empty: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discriminated<T> {
    pub name: String,
    pub value: T,
}

/// Find the single shape `raw` matches
pub fn discriminate<'s, T, I>(raw: &str, shapes: I, options: DecoderOptions) -> Result<Discriminated<T>>
where
    T: Discriminable,
    I: IntoIterator<Item = &'s dyn Shape<T>>,
    T: 's,
{
    let mut matches = Vec::new();
    // Shapes whose `type` matched but whose fields did not validate
    let mut malformed = Vec::new();

    for shape in shapes {
        let name = shape.name();
        let candidate = match shape.decode(raw) {
            Ok(candidate) => candidate,
            Err(err) => {
                debug!(shape = name, error = %err, "payload does not decode");
                continue;
            }
        };
        if options.reject_empty && candidate.is_empty() {
            debug!(shape = name, "payload decodes to an empty object");
            continue;
        }
        let expected = shape.expected_type();
        let type_matches = candidate.type_tag() == Some(expected.as_str());
        if let Err(reason) = candidate.check() {
            debug!(shape = name, reason = %reason, "payload fails validation");
            if type_matches {
                malformed.push(Error::malformed(name, reason));
            }
            continue;
        }
        if !type_matches {
            debug!(
                shape = name,
                expected = %expected,
                found = ?candidate.type_tag(),
                "payload type does not match"
            );
            continue;
        }
        matches.push(Discriminated {
            name: name.to_owned(),
            value: candidate,
        });
    }

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 if malformed.len() == 1 => Err(malformed.remove(0)),
        _ => Err(Error::ambiguous(
            matches.into_iter().map(|found| found.name).collect(),
        )),
    }
}

/// Paginated response envelope, items stay raw until discriminated
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub data: Vec<Box<RawValue>>,
    #[serde(default)]
    pub total_elements: Option<i64>,
}

/// Decode every item of a page, failing on the first item that does not decode
pub fn decode_page<T, F>(raw: &str, mut decode_item: F) -> Result<Vec<T>>
where
    F: FnMut(&RawValue) -> Result<T>,
{
    let page: Page = serde_json::from_str(raw)?;
    debug!(
        items = page.data.len(),
        total = ?page.total_elements,
        "decoding page"
    );
    page.data
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_item(item).map_err(|source| Error::PageItem {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    /// Test shape: only `host` and `path` count as content, `type` alone is empty
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Synthetic {
        #[serde(rename = "type")]
        kind: Option<String>,
        host: Option<String>,
        path: Option<String>,
    }

    impl Discriminable for Synthetic {
        fn type_tag(&self) -> Option<&str> {
            self.kind.as_deref()
        }
        fn is_empty(&self) -> bool {
            self.host.is_none() && self.path.is_none()
        }
        fn check(&self) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    struct SyntheticShape {
        name: &'static str,
        expected: &'static str,
        requires_path: bool,
    }

    impl Shape<Synthetic> for SyntheticShape {
        fn name(&self) -> &str {
            self.name
        }
        fn expected_type(&self) -> String {
            self.expected.to_owned()
        }
        fn decode(&self, raw: &str) -> serde_json::Result<Synthetic> {
            let decoded: Synthetic = serde_json::from_str(raw)?;
            if self.requires_path && decoded.path.is_none() {
                return Err(serde::de::Error::missing_field("path"));
            }
            Ok(decoded)
        }
    }

    fn shapes() -> Vec<SyntheticShape> {
        vec![
            SyntheticShape {
                name: "first",
                expected: "SHARED",
                requires_path: false,
            },
            SyntheticShape {
                name: "second",
                expected: "SHARED",
                requires_path: true,
            },
        ]
    }

    fn run(raw: &str, shapes: &[SyntheticShape]) -> Result<Discriminated<Synthetic>> {
        discriminate(
            raw,
            shapes.iter().map(|s| s as &dyn Shape<Synthetic>),
            DecoderOptions::default(),
        )
    }

    #[test]
    fn single_survivor_wins() {
        let found = run(r#"{"type":"SHARED","host":"h"}"#, &shapes()).unwrap();
        assert_eq!(found.name, "first");
        assert_eq!(found.value.host.as_deref(), Some("h"));
    }

    #[test]
    fn two_survivors_are_ambiguous() {
        let err = run(r#"{"type":"SHARED","host":"h","path":"p"}"#, &shapes()).unwrap_err();
        assert_eq!(
            err,
            Error::Ambiguous {
                count: 2,
                tags: vec!["first".to_owned(), "second".to_owned()],
            }
        );
        assert!(err.to_string().contains("more than one shape"));
    }

    #[test]
    fn empty_object_matches_nothing() {
        let err = run("{}", &shapes()[..1]).unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
        assert!(err.to_string().contains("no known shape"));
    }

    #[test]
    fn empty_check_can_be_disabled() {
        let shape = SyntheticShape {
            name: "lenient",
            expected: "SHARED",
            requires_path: false,
        };
        let raw = r#"{"type":"SHARED"}"#;
        let lenient = DecoderOptions {
            reject_empty: false,
        };

        let err = discriminate(raw, [&shape as &dyn Shape<Synthetic>], DecoderOptions::default())
            .unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));

        let found = discriminate(raw, [&shape as &dyn Shape<Synthetic>], lenient).unwrap();
        assert_eq!(found.name, "lenient");

        // `{}` carries no `type`, so the tag match discards it either way
        let err = discriminate("{}", [&shape as &dyn Shape<Synthetic>], lenient).unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
    }

    #[test]
    fn type_mismatch_is_discarded() {
        let err = run(r#"{"type":"OTHER","host":"h"}"#, &shapes()).unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
    }

    #[test]
    fn invalid_json_matches_nothing() {
        let err = run("not json", &shapes()).unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
    }

    #[test]
    fn page_items_are_decoded_in_order() {
        let raw = r#"{"data":[{"n":1},{"n":2}],"totalElements":2}"#;
        let items = decode_page(raw, |item| Ok(item.get().to_owned())).unwrap();
        assert_eq!(items, vec![r#"{"n":1}"#, r#"{"n":2}"#]);
    }

    #[test]
    fn page_failure_names_the_item() {
        let raw = r#"{"data":[{"n":1},{"n":2}]}"#;
        let err = decode_page(raw, |item| {
            if item.get().contains('2') {
                Err(Error::ambiguous(vec![]))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
        assert!(matches!(err, Error::PageItem { index: 1, .. }));
    }
}

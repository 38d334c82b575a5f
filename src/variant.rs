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

//! Per-type contract of a source variant
//!
//! A variant is a pair of records: the Terraform-facing parameters (one slot of
//! [`FlatParameters`](crate::parameters::FlatParameters)) and the wire DTO exchanged
//! with the API. Most variants only hold scalar fields and are declared with
//! [`source_variant!`]; the others implement [`Variant`] by hand.

use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::RangeInclusive;

use serde::{de::DeserializeOwned, Serialize};
use tf_provider::{Attribute, AttributePath, AttributeType, Diagnostics, Value};

use crate::decoder::Discriminable;
use crate::error::{Error, Result};
use crate::utils::DisplayJoinable;

pub trait WireDto:
    Discriminable + Serialize + DeserializeOwned + Default + Clone + Debug + PartialEq + Send + Sync
{
    fn set_type_tag(&mut self, tag: String);
}

pub trait Variant: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Schema-facing tag, lowercase
    const TAG: &'static str;
    const REQUIRES_CREDENTIAL: bool;

    type Dto: WireDto;

    fn description() -> &'static str;

    /// Attributes of the slot, keyed by their Terraform name
    fn attributes() -> HashMap<String, Attribute>;

    /// Convert to the wire shape, the `type` field is stamped by the handler
    fn to_dto(&self) -> Result<Self::Dto>;

    fn from_dto(dto: &Self::Dto) -> Result<Self>;

    /// Check values that the schema alone cannot constrain
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        _ = diags;
        _ = attr_path;
    }
}

/// Terraform type of a scalar field
pub trait FieldType {
    fn attr_type() -> AttributeType;
}

impl FieldType for String {
    fn attr_type() -> AttributeType {
        AttributeType::String
    }
}

impl FieldType for i64 {
    fn attr_type() -> AttributeType {
        AttributeType::Number
    }
}

impl FieldType for bool {
    fn attr_type() -> AttributeType {
        AttributeType::Bool
    }
}

pub(crate) fn required_value<T: Clone>(tag: &str, field: &str, value: &Value<T>) -> Result<T> {
    match value {
        Value::Value(value) => Ok(value.clone()),
        Value::Null => Err(Error::malformed(tag, format!("{field} is required"))),
        Value::Unknown => Err(Error::malformed(tag, format!("{field} is not known yet"))),
    }
}

pub(crate) fn optional_value<T: Clone>(
    tag: &str,
    field: &str,
    value: &Value<T>,
) -> Result<Option<T>> {
    match value {
        Value::Value(value) => Ok(Some(value.clone())),
        Value::Null => Ok(None),
        Value::Unknown => Err(Error::malformed(tag, format!("{field} is not known yet"))),
    }
}

pub(crate) fn present<T: Clone>(tag: &str, wire: &str, value: &Option<T>) -> Result<Value<T>> {
    match value {
        Some(value) => Ok(Value::Value(value.clone())),
        None => Err(Error::malformed(
            tag,
            format!("missing required field {wire}"),
        )),
    }
}

pub(crate) fn missing_fields(missing: &[&str]) -> std::result::Result<(), String> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "missing required field(s): {}",
            missing.iter().join_with(", ")
        ))
    }
}

/// Report a number outside of `range`, unknown and null values are left alone
pub fn check_range(
    value: &Value<i64>,
    range: RangeInclusive<i64>,
    diags: &mut Diagnostics,
    attr_path: AttributePath,
) {
    if let Value::Value(number) = value {
        if !range.contains(number) {
            diags.error(
                "Value out of range",
                format!(
                    "{number} is not between {} and {}",
                    range.start(),
                    range.end()
                ),
                attr_path,
            );
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_constraint {
    (required) => {
        tf_provider::AttributeConstraint::Required
    };
    (optional) => {
        tf_provider::AttributeConstraint::Optional
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_is_required {
    (required) => {
        true
    };
    (optional) => {
        false
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_to_wire {
    (required, $tag:expr, $name:expr, $value:expr) => {
        Some($crate::variant::required_value($tag, $name, $value)?)
    };
    (optional, $tag:expr, $name:expr, $value:expr) => {
        $crate::variant::optional_value($tag, $name, $value)?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_from_wire {
    (required, $tag:expr, $wire:expr, $value:expr) => {
        $crate::variant::present($tag, $wire, $value)?
    };
    (optional, $tag:expr, $wire:expr, $value:expr) => {
        $value
            .clone()
            .map_or(tf_provider::Value::Null, tf_provider::Value::Value)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_range {
    ($value:expr, $diags:expr, $path:expr, $name:expr) => {};
    ($value:expr, $diags:expr, $path:expr, $name:expr, $range:expr) => {
        $crate::variant::check_range($value, $range, $diags, $path.clone().attribute($name))
    };
}

/// Declare a variant made of scalar fields
///
/// Each field reads `name: Type [required|optional] "wireName" "description"`.
/// Integer fields may add a bound after the constraint: `[required in 1..=65535]`.
/// The macro generates the parameters record, its wire DTO and the [`Variant`]
/// implementation mapping one onto the other field by field.
#[macro_export]
macro_rules! source_variant {
    (
        $(#[$meta:meta])*
        $params:ident / $dto:ident {
            tag: $tag:literal,
            requires_credential: $credential:literal,
            fields: {
                $($field:ident: $ty:ty [$kind:ident $(in $range:expr)?] $wire:literal $doc:literal,)+
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $params {
            $(pub $field: tf_provider::Value<$ty>,)+
        }

        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $dto {
            #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
            pub source_type: Option<String>,
            $(
                #[serde(rename = $wire, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl $crate::decoder::Discriminable for $dto {
            fn type_tag(&self) -> Option<&str> {
                self.source_type.as_deref()
            }

            fn is_empty(&self) -> bool {
                self.source_type.is_none() $(&& self.$field.is_none())+
            }

            fn check(&self) -> std::result::Result<(), String> {
                let missing = [$(($crate::__field_is_required!($kind) && self.$field.is_none(), $wire),)+];
                let missing = missing
                    .iter()
                    .filter_map(|(missing, wire)| missing.then_some(*wire))
                    .collect::<Vec<_>>();
                $crate::variant::missing_fields(&missing)
            }
        }

        impl $crate::variant::WireDto for $dto {
            fn set_type_tag(&mut self, tag: String) {
                self.source_type = Some(tag);
            }
        }

        impl $crate::variant::Variant for $params {
            const TAG: &'static str = $tag;
            const REQUIRES_CREDENTIAL: bool = $credential;

            type Dto = $dto;

            fn description() -> &'static str {
                concat!("Parameters of a `", $tag, "` source")
            }

            fn attributes() -> std::collections::HashMap<String, tf_provider::Attribute> {
                tf_provider::map! {
                    $(
                        stringify!($field) => tf_provider::Attribute {
                            attr_type: <$ty as $crate::variant::FieldType>::attr_type(),
                            description: tf_provider::Description::plain($doc),
                            constraint: $crate::__field_constraint!($kind),
                            ..Default::default()
                        }
                    ),+
                }
            }

            fn to_dto(&self) -> $crate::error::Result<$dto> {
                Ok($dto {
                    source_type: None,
                    $($field: $crate::__field_to_wire!($kind, $tag, stringify!($field), &self.$field),)+
                })
            }

            fn from_dto(dto: &$dto) -> $crate::error::Result<Self> {
                Ok(Self {
                    $($field: $crate::__field_from_wire!($kind, $tag, $wire, &dto.$field),)+
                })
            }

            fn validate(
                &self,
                _diags: &mut tf_provider::Diagnostics,
                _attr_path: tf_provider::AttributePath,
            ) {
                $(
                    $crate::__field_range!(
                        &self.$field,
                        _diags,
                        &_attr_path,
                        stringify!($field)
                        $(, $range)?
                    );
                )+
            }
        }
    };
}

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

use std::fmt::Debug;
use std::marker::PhantomData;

use tf_provider::{AttributePath, Block, Description, Diagnostics, Value};

use crate::decoder::{Discriminable, Shape};
use crate::error::{Error, Result};
use crate::parameters::{FlatParameters, ParametersDto, Slot, SourceParameters};
use crate::registry::wire_tag;
use crate::variant::{Variant, WireDto};

/// Uniform contract of a source type
pub trait SourceHandler: Send + Sync + Debug {
    fn schema_tag(&self) -> &'static str;

    fn wire_tag(&self) -> String {
        wire_tag(self.schema_tag())
    }

    fn field_shape(&self) -> Block;

    fn requires_credential(&self) -> bool;

    /// Whether the slot of this type is set in the container
    ///
    /// `source_type` is never consulted: this is what computes it.
    fn matches_container(&self, container: &FlatParameters) -> bool;

    fn to_create_dto(&self, container: &FlatParameters) -> Result<ParametersDto>;

    fn to_update_dto(&self, container: &FlatParameters) -> Result<ParametersDto>;

    fn from_dto(&self, dto: &ParametersDto) -> Result<SourceParameters>;

    fn validate(&self, container: &FlatParameters, diags: &mut Diagnostics, attr_path: AttributePath);

    fn as_shape(&self) -> &dyn Shape<ParametersDto>;
}

pub struct VariantHandler<V> {
    marker: PhantomData<fn() -> V>,
}

impl<V> VariantHandler<V> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<V> Default for VariantHandler<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variant> Debug for VariantHandler<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VariantHandler").field(&V::TAG).finish()
    }
}

impl<V: Slot> VariantHandler<V> {
    fn to_dto(&self, container: &FlatParameters) -> Result<ParametersDto> {
        let params = match V::slot(container) {
            Value::Value(params) => params,
            Value::Null => {
                return Err(Error::contract(format!(
                    "`{}` parameters requested from a container where they are not set",
                    V::TAG
                )))
            }
            Value::Unknown => {
                return Err(Error::malformed(V::TAG, "parameters are not known yet"));
            }
        };

        let mut dto = params.to_dto()?;
        dto.set_type_tag(self.wire_tag());
        dto.check().map_err(|reason| Error::malformed(V::TAG, reason))?;
        Ok(V::wrap_dto(dto))
    }
}

impl<V: Slot> SourceHandler for VariantHandler<V> {
    fn schema_tag(&self) -> &'static str {
        V::TAG
    }

    fn field_shape(&self) -> Block {
        Block {
            description: Description::plain(V::description()),
            attributes: V::attributes(),
            ..Default::default()
        }
    }

    fn requires_credential(&self) -> bool {
        V::REQUIRES_CREDENTIAL
    }

    fn matches_container(&self, container: &FlatParameters) -> bool {
        !V::slot(container).is_null()
    }

    fn to_create_dto(&self, container: &FlatParameters) -> Result<ParametersDto> {
        self.to_dto(container)
    }

    fn to_update_dto(&self, container: &FlatParameters) -> Result<ParametersDto> {
        self.to_dto(container)
    }

    fn from_dto(&self, dto: &ParametersDto) -> Result<SourceParameters> {
        let Some(inner) = V::unwrap_dto(dto) else {
            return Err(Error::malformed(
                V::TAG,
                format!("payload holds `{}` parameters", dto.schema_tag()),
            ));
        };
        let expected = self.wire_tag();
        match inner.type_tag() {
            Some(found) if found != expected => {
                return Err(Error::malformed(
                    V::TAG,
                    format!("payload type is {found}, expected {expected}"),
                ));
            }
            _ => (),
        }
        Ok(V::from_dto(inner)?.wrap())
    }

    fn validate(&self, container: &FlatParameters, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(params) = V::slot(container) {
            params.validate(diags, attr_path.attribute(V::TAG));
        }
    }

    fn as_shape(&self) -> &dyn Shape<ParametersDto> {
        self
    }
}

impl<V: Slot> Shape<ParametersDto> for VariantHandler<V> {
    fn name(&self) -> &str {
        V::TAG
    }

    fn expected_type(&self) -> String {
        self.wire_tag()
    }

    fn decode(&self, raw: &str) -> serde_json::Result<ParametersDto> {
        serde_json::from_str::<V::Dto>(raw).map(V::wrap_dto)
    }
}

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

use tf_provider::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::handler::SourceHandler;
use crate::parameters::FlatParameters;
use crate::registry::Registry;
use crate::utils::DisplayJoinable;

/// Handler of the single populated slot of `container`
pub fn resolve<'r>(
    registry: &'r Registry,
    container: &FlatParameters,
) -> Result<&'r dyn SourceHandler> {
    let mut matching = registry
        .handlers()
        .filter(|handler| handler.matches_container(container))
        .collect::<Vec<_>>();

    if matching.len() == 1 {
        let handler = matching.remove(0);
        debug!(source_type = handler.schema_tag(), "source type resolved");
        return Ok(handler);
    }

    Err(Error::contract(format!(
        "could not determine source type from configuration: {} parameter blocks set ({})",
        matching.len(),
        matching.iter().map(|handler| handler.schema_tag()).join_with(", ")
    )))
}

/// Resolve a container that may itself be null or not yet known
pub fn resolve_value<'r>(
    registry: &'r Registry,
    container: &Value<FlatParameters>,
) -> Result<&'r dyn SourceHandler> {
    match container {
        Value::Value(container) => resolve(registry, container),
        Value::Null => Err(Error::contract("source parameters are null")),
        Value::Unknown => Err(Error::NotKnown {
            what: "source parameters".to_owned(),
        }),
    }
}

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

use tf_provider::{AttributePath, Diagnostics, Value};

use crate::handler::SourceHandler;
use crate::registry::Registry;
use crate::utils::{DisplayJoinable, WithValidate};

use super::FlatParameters;

impl WithValidate for FlatParameters {
    fn validate(&self, registry: &Registry, diags: &mut Diagnostics, attr_path: AttributePath) {
        let populated = registry
            .handlers()
            .filter(|handler| handler.matches_container(self))
            .collect::<Vec<_>>();

        match populated.as_slice() {
            [] => diags.error(
                "Missing source parameters",
                format!(
                    "Exactly one of {} must be set.",
                    registry.all_tags().iter().join_with(", ")
                ),
                attr_path,
            ),
            [handler] => {
                if let Value::Value(source_type) = &self.source_type {
                    if let Err(err) = registry.lookup(source_type) {
                        err.report(diags, attr_path.clone().attribute("source_type"));
                    } else if source_type != handler.schema_tag() {
                        diags.error(
                            "Inconsistent source type",
                            format!(
                                "`source_type` is {source_type} but `{}` parameters are set.",
                                handler.schema_tag()
                            ),
                            attr_path.clone().attribute("source_type"),
                        );
                    }
                }
                handler.validate(self, diags, attr_path);
            }
            handlers => {
                let tags = handlers.iter().map(|handler| handler.schema_tag());
                let detail = format!("Only one of them can be set, found {}.", tags.join_with(", "));
                for handler in handlers {
                    diags.error(
                        "Conflicting source parameters",
                        detail.clone(),
                        attr_path.clone().attribute(handler.schema_tag()),
                    );
                }
            }
        }
    }
}

/// Check the credential is set exactly when the source type needs one
pub fn validate_credential(
    handler: &dyn SourceHandler,
    credential: &Value<String>,
    diags: &mut Diagnostics,
    attr_path: AttributePath,
) {
    match (handler.requires_credential(), credential) {
        (true, Value::Null) => diags.error(
            "Missing credential",
            format!("A `{}` source requires a credential.", handler.schema_tag()),
            attr_path,
        ),
        (false, Value::Value(_)) => diags.error(
            "Unexpected credential",
            format!("A `{}` source does not use any credential.", handler.schema_tag()),
            attr_path,
        ),
        _ => (),
    }
}

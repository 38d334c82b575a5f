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

//! Replacement planning across a change of source type
//!
//! Changing any parameter slot would otherwise replace the source. Only a change
//! of source type actually needs it: parameters of the same type are updated in
//! place.

use tf_provider::{AttributePath, Diagnostics, Value};
use tracing::warn;

use crate::parameters::FlatParameters;
use crate::registry::Registry;
use crate::resolver::resolve_value;

/// Whether going from `prior` to `proposed` needs the source to be replaced
///
/// When either side cannot be resolved, a warning is emitted and replacement is
/// assumed.
pub fn requires_replacement(
    registry: &Registry,
    diags: &mut Diagnostics,
    prior: &Value<FlatParameters>,
    proposed: &Value<FlatParameters>,
    attr_path: AttributePath,
) -> bool {
    let prior_type = resolve_value(registry, prior);
    let proposed_type = resolve_value(registry, proposed);

    match (prior_type, proposed_type) {
        (Ok(prior), Ok(proposed)) => prior.schema_tag() != proposed.schema_tag(),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "cannot compare source types, assuming replacement");
            diags.warning(
                "Unable to determine the source type",
                format!("{err}\nThe source will be replaced."),
                attr_path,
            );
            true
        }
    }
}

/// Attribute paths triggering a replacement, as expected by `plan_update`
pub fn plan_replacement(
    registry: &Registry,
    diags: &mut Diagnostics,
    prior: &Value<FlatParameters>,
    proposed: &Value<FlatParameters>,
    attr_path: AttributePath,
) -> Vec<AttributePath> {
    if requires_replacement(registry, diags, prior, proposed, attr_path.clone()) {
        vec![attr_path]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::SourceParameters;
    use crate::registry::DEFAULT_REGISTRY;
    use crate::variants::{BigQueryParameters, SnowflakeParameters};

    fn bigquery(dataset: &str) -> Value<FlatParameters> {
        Value::Value(FlatParameters::from(SourceParameters::BigQuery(
            BigQueryParameters {
                project_id: Value::Value("p".to_owned()),
                billing_project_id: Value::Null,
                dataset_id: Value::Value(dataset.to_owned()),
            },
        )))
    }

    fn snowflake() -> Value<FlatParameters> {
        Value::Value(FlatParameters::from(SourceParameters::Snowflake(
            SnowflakeParameters {
                account_identifier: Value::Value("acme".to_owned()),
                database: Value::Value("db".to_owned()),
                schema: Value::Value("public".to_owned()),
                warehouse: Value::Value("wh".to_owned()),
            },
        )))
    }

    fn path() -> AttributePath {
        AttributePath::new("parameters")
    }

    #[test]
    fn type_change_requires_replacement() {
        let mut diags = Diagnostics::default();
        assert!(requires_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &bigquery("d"),
            &snowflake(),
            path()
        ));
        assert!(diags.warnings.is_empty());
    }

    #[test]
    fn same_type_updates_in_place() {
        let mut diags = Diagnostics::default();
        assert!(!requires_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &bigquery("d1"),
            &bigquery("d2"),
            path()
        ));
        assert!(diags.warnings.is_empty());
        assert!(diags.errors.is_empty());
    }

    #[test]
    fn unresolvable_side_warns_and_replaces() {
        let mut diags = Diagnostics::default();
        assert!(requires_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &bigquery("d"),
            &Value::Unknown,
            path()
        ));
        assert_eq!(diags.warnings.len(), 1);
        assert!(diags.errors.is_empty());

        let mut diags = Diagnostics::default();
        assert!(requires_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &Value::Value(FlatParameters::default()),
            &bigquery("d"),
            path()
        ));
        assert_eq!(diags.warnings.len(), 1);
    }

    #[test]
    fn replacement_paths() {
        let mut diags = Diagnostics::default();
        let paths = plan_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &bigquery("d"),
            &snowflake(),
            path(),
        );
        assert_eq!(paths.len(), 1);
        let paths = plan_replacement(
            &DEFAULT_REGISTRY,
            &mut diags,
            &bigquery("d"),
            &bigquery("e"),
            path(),
        );
        assert!(paths.is_empty());
    }
}

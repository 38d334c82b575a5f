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

//! Table of the known source types
//!
//! The table is built once and only read afterwards. Consumers receive it by
//! reference, [`DEFAULT_REGISTRY`] holds the one with every source type.

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use serde_json::value::RawValue;
use tracing::debug;

use crate::decoder::{decode_page, discriminate, DecoderOptions, Discriminated, Shape};
use crate::error::{Error, Result};
use crate::handler::{SourceHandler, VariantHandler};
use crate::parameters::{all_handlers, FlatParameters, ParametersDto, Slot, SourceParameters};

lazy_static! {
    pub static ref DEFAULT_REGISTRY: Registry = Registry::with_all_variants();
}

/// Wire tag of a schema tag
pub fn wire_tag(schema_tag: &str) -> String {
    schema_tag.to_ascii_uppercase()
}

/// Schema tag of a wire tag
pub fn schema_tag(wire_tag: &str) -> String {
    wire_tag.to_ascii_lowercase()
}

#[derive(Debug)]
pub struct Registry {
    handlers: BTreeMap<&'static str, Box<dyn SourceHandler>>,
    options: DecoderOptions,
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    handlers: Vec<Box<dyn SourceHandler>>,
    options: DecoderOptions,
}

impl RegistryBuilder {
    pub fn register<V: Slot>(self) -> Self {
        self.register_handler(Box::new(VariantHandler::<V>::new()))
    }

    pub fn register_handler(mut self, handler: Box<dyn SourceHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn decoder_options(mut self, options: DecoderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Registry> {
        let mut handlers = BTreeMap::new();
        for handler in self.handlers {
            let tag = handler.schema_tag();
            if tag.is_empty() || tag != schema_tag(tag) {
                return Err(Error::Registry {
                    message: format!("source type `{tag}` must be a non-empty lowercase tag"),
                });
            }
            if handlers.insert(tag, handler).is_some() {
                return Err(Error::Registry {
                    message: format!("source type `{tag}` is registered twice"),
                });
            }
        }
        Ok(Registry {
            handlers,
            options: self.options,
        })
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry of every source type
    pub fn with_all_variants() -> Self {
        Self {
            handlers: all_handlers()
                .into_iter()
                .map(|handler| (handler.schema_tag(), handler))
                .collect(),
            options: DecoderOptions::default(),
        }
    }

    /// Handler of a schema-facing tag
    pub fn lookup(&self, tag: &str) -> Result<&dyn SourceHandler> {
        self.handlers
            .get(tag)
            .map(Box::as_ref)
            .ok_or_else(|| Error::unsupported(tag))
    }

    /// Handler of a wire-facing tag
    pub fn lookup_wire(&self, tag: &str) -> Result<&dyn SourceHandler> {
        self.handlers
            .get(schema_tag(tag).as_str())
            .map(Box::as_ref)
            .ok_or_else(|| Error::unsupported(tag))
    }

    pub fn all_tags(&self) -> BTreeSet<&'static str> {
        self.handlers.keys().copied().collect()
    }

    pub fn handlers(&self) -> impl Iterator<Item = &dyn SourceHandler> {
        self.handlers.values().map(Box::as_ref)
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Discriminate a raw `oneOf` parameters payload
    pub fn discriminate(&self, raw: &str) -> Result<Discriminated<ParametersDto>> {
        discriminate(
            raw,
            self.handlers().map(|handler| handler.as_shape() as &dyn Shape<ParametersDto>),
            self.options,
        )
    }

    /// Decode a raw `oneOf` parameters payload
    pub fn decode(&self, raw: &str) -> Result<SourceParameters> {
        let found = self.discriminate(raw)?;
        debug!(source_type = %found.name, "parameters discriminated");
        self.lookup(&found.name)?.from_dto(&found.value)
    }

    pub fn decode_slice(&self, raw: &[u8]) -> Result<SourceParameters> {
        let raw = std::str::from_utf8(raw).map_err(|err| Error::Json {
            message: err.to_string(),
        })?;
        self.decode(raw)
    }

    /// Decode a raw payload into a container ready to be written to the state
    pub fn decode_flat(&self, raw: &RawValue) -> Result<FlatParameters> {
        self.decode(raw.get()).map(FlatParameters::from)
    }

    /// Decode a page whose items are `oneOf` parameters payloads
    pub fn decode_page(&self, raw: &str) -> Result<Vec<FlatParameters>> {
        decode_page(raw, |item| self.decode_flat(item))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{json, Map};
    use tf_provider::{AttributeType, Value};

    use super::*;
    use crate::variants::{BigQueryParameters, GitConnection, LookerParameters};

    /// Valid payload of a source type, built from its schema
    fn sample_payload(handler: &dyn SourceHandler) -> serde_json::Value {
        let mut payload = Map::new();
        payload.insert("type".to_owned(), json!(handler.wire_tag()));
        for (name, attribute) in handler.field_shape().attributes {
            let wire = camel_case(&name);
            let value = match (name.as_str(), &attribute.attr_type) {
                ("mysql_tls_version", _) => json!("TLS_V_1_2"),
                ("git_connections", _) => json!([{"authType": "SSH", "url": "u", "secretId": "s"}]),
                (_, AttributeType::Number) => json!(443),
                _ => json!(format!("{name}-value")),
            };
            payload.insert(wire, value);
        }
        serde_json::Value::Object(payload)
    }

    fn camel_case(name: &str) -> String {
        let mut out = String::new();
        let mut upper = false;
        for c in name.chars() {
            if c == '_' {
                upper = true;
            } else if upper {
                out.push(c.to_ascii_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn tag_transform() {
        assert_eq!(wire_tag("dbt_cloud"), "DBT_CLOUD");
        assert_eq!(schema_tag("POWER_BI"), "power_bi");
    }

    #[test]
    fn lookup_both_boundaries() {
        let registry = Registry::with_all_variants();
        assert_eq!(registry.lookup("bigquery").unwrap().schema_tag(), "bigquery");
        assert_eq!(
            registry.lookup_wire("DBT_CLOUD").unwrap().schema_tag(),
            "dbt_cloud"
        );
        assert_eq!(
            registry.lookup("BIGQUERY").unwrap_err(),
            Error::unsupported("BIGQUERY")
        );
        assert_eq!(
            registry.lookup_wire("TERADATA").unwrap_err().to_string(),
            "unsupported source type: TERADATA"
        );
    }

    #[test]
    fn all_tags_are_unique() {
        let registry = Registry::with_all_variants();
        assert_eq!(registry.all_tags().len(), 19);
        assert_eq!(all_handlers().len(), 19);
        let built = all_handlers()
            .into_iter()
            .fold(Registry::builder(), RegistryBuilder::register_handler)
            .build()
            .unwrap();
        assert_eq!(built.all_tags(), registry.all_tags());
    }

    #[test]
    fn duplicate_registration_fails() {
        let err = Registry::builder()
            .register::<BigQueryParameters>()
            .register::<BigQueryParameters>()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Registry { .. }));
    }

    #[test]
    fn partial_registry_only_knows_its_types() {
        let registry = Registry::builder()
            .register::<BigQueryParameters>()
            .build()
            .unwrap();
        assert!(registry.lookup("snowflake").is_err());
        let err = registry
            .decode(r#"{"type":"SNOWFLAKE","accountIdentifier":"a","database":"d","schema":"s","warehouse":"w"}"#)
            .unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
    }

    #[test]
    fn credential_requirements() {
        let registry = &*DEFAULT_REGISTRY;
        for tag in ["athena", "dbt", "quicksight"] {
            assert!(!registry.lookup(tag).unwrap().requires_credential(), "{tag}");
        }
        for tag in ["bigquery", "snowflake", "databricks"] {
            assert!(registry.lookup(tag).unwrap().requires_credential(), "{tag}");
        }
    }

    #[test]
    fn every_type_discriminates_to_itself() {
        let registry = Registry::with_all_variants();
        for handler in registry.handlers() {
            let payload = sample_payload(handler).to_string();
            let params = registry
                .decode(&payload)
                .unwrap_or_else(|err| panic!("{}: {err}", handler.schema_tag()));
            assert_eq!(params.schema_tag(), handler.schema_tag());

            let container = FlatParameters::from(params);
            let dto = handler.to_create_dto(&container).unwrap();
            assert_eq!(
                serde_json::to_value(&dto).unwrap(),
                serde_json::from_str::<serde_json::Value>(&payload).unwrap(),
                "{}",
                handler.schema_tag()
            );
        }
    }

    #[test]
    fn empty_object_matches_nothing() {
        let registry = Registry::with_all_variants();
        assert_eq!(registry.decode("{}").unwrap_err(), Error::ambiguous(vec![]));
    }

    #[test]
    fn type_alone_is_not_trusted() {
        let registry = Registry::with_all_variants();
        let err = registry
            .decode(r#"{"type":"BIGQUERY","projectId":"p"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::malformed("bigquery", "missing required field(s): datasetId")
        );
        let err = registry.decode(r#"{"type":"TERADATA","host":"h"}"#).unwrap_err();
        assert_eq!(err, Error::ambiguous(vec![]));
    }

    #[test]
    fn bigquery_scenario() {
        let registry = Registry::with_all_variants();
        let params = registry
            .decode_slice(br#"{"type":"BIGQUERY","projectId":"p","datasetId":"d"}"#)
            .unwrap();
        assert_eq!(
            params,
            SourceParameters::BigQuery(BigQueryParameters {
                project_id: Value::Value("p".to_owned()),
                billing_project_id: Value::Null,
                dataset_id: Value::Value("d".to_owned()),
            })
        );
    }

    #[test]
    fn looker_scenario() {
        let registry = Registry::with_all_variants();
        let params = registry
            .decode(r#"{"type":"LOOKER","host":"h","gitConnections":[{"authType":"SSH","url":"u","secretId":"s"}]}"#)
            .unwrap();
        assert_eq!(
            params,
            SourceParameters::Looker(LookerParameters {
                host: Value::Value("h".into()),
                git_connections: Value::Value(vec![Value::Value(GitConnection {
                    auth_type: Value::Value("SSH".to_owned()),
                    branch: Value::Null,
                    secret_id: Value::Value("s".to_owned()),
                    url: Value::Value("u".to_owned()),
                })]),
            })
        );
    }

    #[test]
    fn looker_bogus_auth_type_is_named() {
        let registry = Registry::with_all_variants();
        let err = registry
            .decode(r#"{"type":"LOOKER","host":"h","gitConnections":[{"authType":"bogus","url":"u","secretId":"s"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedShape { ref tag, .. } if tag == "looker"));
        assert!(err.to_string().contains("\"bogus\""));
    }

    #[test]
    fn page_of_parameters() {
        let registry = Registry::with_all_variants();
        let page = json!({
            "data": [
                {"type": "BIGQUERY", "projectId": "p", "datasetId": "d"},
                {"type": "FIVETRAN", "host": "h"},
            ],
            "totalElements": 2,
        });
        let containers = registry.decode_page(&page.to_string()).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].source_type, Value::Value("bigquery".to_owned()));
        assert_eq!(containers[1].source_type, Value::Value("fivetran".to_owned()));

        let page = json!({"data": [{"type": "FIVETRAN", "host": "h"}, {}]});
        let err = registry.decode_page(&page.to_string()).unwrap_err();
        assert!(matches!(err, Error::PageItem { index: 1, .. }));
    }

    fn value(s: String) -> Value<String> {
        Value::Value(s)
    }

    fn bigquery_strategy() -> impl Strategy<Value = BigQueryParameters> {
        (".{1,20}", proptest::option::of(".{1,20}"), ".{1,20}").prop_map(
            |(project_id, billing_project_id, dataset_id)| BigQueryParameters {
                project_id: value(project_id),
                billing_project_id: billing_project_id.map_or(Value::Null, value),
                dataset_id: value(dataset_id),
            },
        )
    }

    fn looker_strategy() -> impl Strategy<Value = LookerParameters> {
        let auth_type = prop_oneof![
            Just("HTTP_AUTHORIZATION_HEADER"),
            Just("USER_PASSWORD"),
            Just("SSH"),
        ];
        let connection = (auth_type, proptest::option::of("[a-z]{1,10}"), "[a-z]{1,10}", ".{1,30}")
            .prop_map(|(auth_type, branch, secret_id, url)| {
                Value::Value(GitConnection {
                    auth_type: value(auth_type.to_owned()),
                    branch: branch.map_or(Value::Null, value),
                    secret_id: value(secret_id),
                    url: value(url),
                })
            });
        ("[a-z.]{1,20}", proptest::collection::vec(connection, 0..4)).prop_map(
            |(host, connections)| LookerParameters {
                host: Value::Value(host.into()),
                git_connections: Value::Value(connections),
            },
        )
    }

    fn through_the_wire(params: SourceParameters) -> SourceParameters {
        let registry = &*DEFAULT_REGISTRY;
        let handler = registry.lookup(params.schema_tag()).unwrap();
        let dto = handler.to_create_dto(&FlatParameters::from(params)).unwrap();
        registry.decode(&serde_json::to_string(&dto).unwrap()).unwrap()
    }

    proptest! {
        #[test]
        fn bigquery_round_trip(params in bigquery_strategy()) {
            let params = SourceParameters::BigQuery(params);
            prop_assert_eq!(through_the_wire(params.clone()), params);
        }

        #[test]
        fn looker_round_trip(params in looker_strategy()) {
            let params = SourceParameters::Looker(params);
            prop_assert_eq!(through_the_wire(params.clone()), params);
        }
    }
}

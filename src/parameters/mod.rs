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

//! Source parameters, as declared in Terraform and as exchanged on the wire
//!
//! [`FlatParameters`] mirrors the Terraform schema: one optional slot per source
//! type, at most one of them set. Once resolved, the populated slot becomes a
//! [`SourceParameters`] value, and its wire form a [`ParametersDto`].

use serde::{Deserialize, Serialize};
use tf_provider::Value;

use crate::decoder::Discriminable;
use crate::handler::{SourceHandler, VariantHandler};
use crate::variant::Variant;
use crate::variants::*;

mod normalize;
mod schema;
mod validate;

pub use validate::validate_credential;

/// Plumbing between a variant and the containers holding it
pub trait Slot: Variant {
    fn slot(container: &FlatParameters) -> &Value<Self>;
    fn wrap(self) -> SourceParameters;
    fn wrap_dto(dto: Self::Dto) -> ParametersDto;
    fn unwrap_dto(dto: &ParametersDto) -> Option<&Self::Dto>;
}

macro_rules! declare_sources {
    ($($slot:ident => $variant:ident($params:ident, $dto:ident),)+) => {
        /// Terraform-facing parameters, one optional slot per source type
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct FlatParameters {
            pub source_type: Value<String>,
            $(pub $slot: Value<$params>,)+
        }

        #[derive(Debug, Clone, PartialEq)]
        pub enum SourceParameters {
            $($variant($params),)+
        }

        impl SourceParameters {
            pub fn schema_tag(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$params as Variant>::TAG,)+
                }
            }
        }

        impl From<SourceParameters> for FlatParameters {
            fn from(params: SourceParameters) -> Self {
                let mut container = Self {
                    source_type: Value::Value(params.schema_tag().to_owned()),
                    ..Default::default()
                };
                match params {
                    $(SourceParameters::$variant(params) => container.$slot = Value::Value(params),)+
                }
                container
            }
        }

        /// Wire union, serialized as the embedded shape without any envelope
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum ParametersDto {
            $($variant($dto),)+
        }

        impl ParametersDto {
            pub fn schema_tag(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$params as Variant>::TAG,)+
                }
            }
        }

        impl Discriminable for ParametersDto {
            fn type_tag(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(dto) => dto.type_tag(),)+
                }
            }

            fn is_empty(&self) -> bool {
                match self {
                    $(Self::$variant(dto) => dto.is_empty(),)+
                }
            }

            fn check(&self) -> std::result::Result<(), String> {
                match self {
                    $(Self::$variant(dto) => dto.check(),)+
                }
            }
        }

        $(
            impl Slot for $params {
                fn slot(container: &FlatParameters) -> &Value<Self> {
                    &container.$slot
                }

                fn wrap(self) -> SourceParameters {
                    SourceParameters::$variant(self)
                }

                fn wrap_dto(dto: $dto) -> ParametersDto {
                    ParametersDto::$variant(dto)
                }

                fn unwrap_dto(dto: &ParametersDto) -> Option<&$dto> {
                    match dto {
                        ParametersDto::$variant(dto) => Some(dto),
                        _ => None,
                    }
                }
            }
        )+

        /// One handler per source type, in declaration order
        pub(crate) fn all_handlers() -> Vec<Box<dyn SourceHandler>> {
            vec![$(Box::new(VariantHandler::<$params>::new()),)+]
        }
    };
}

declare_sources! {
    airflow => Airflow(AirflowParameters, AirflowDto),
    athena => Athena(AthenaParameters, AthenaDto),
    bigquery => BigQuery(BigQueryParameters, BigQueryDto),
    databricks => Databricks(DatabricksParameters, DatabricksDto),
    dbt => Dbt(DbtParameters, DbtDto),
    dbt_cloud => DbtCloud(DbtCloudParameters, DbtCloudDto),
    fivetran => Fivetran(FivetranParameters, FivetranDto),
    hive => Hive(HiveParameters, HiveDto),
    looker => Looker(LookerParameters, LookerDto),
    mssql => Mssql(MssqlParameters, MssqlDto),
    mysql => Mysql(MysqlParameters, MysqlDto),
    oracle => Oracle(OracleParameters, OracleDto),
    postgresql => Postgresql(PostgresqlParameters, PostgresqlDto),
    power_bi => PowerBi(PowerBiParameters, PowerBiDto),
    quicksight => Quicksight(QuicksightParameters, QuicksightDto),
    redshift => Redshift(RedshiftParameters, RedshiftDto),
    snowflake => Snowflake(SnowflakeParameters, SnowflakeDto),
    synapse => Synapse(SynapseParameters, SynapseDto),
    tableau => Tableau(TableauParameters, TableauDto),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_from_parameters_sets_one_slot() {
        let container = FlatParameters::from(SourceParameters::Snowflake(SnowflakeParameters {
            account_identifier: Value::Value("acme".to_owned()),
            database: Value::Value("db".to_owned()),
            schema: Value::Value("public".to_owned()),
            warehouse: Value::Value("wh".to_owned()),
        }));
        assert_eq!(container.source_type, Value::Value("snowflake".to_owned()));
        assert!(!container.snowflake.is_null());
        assert!(container.bigquery.is_null());
        assert_eq!(
            all_handlers()
                .iter()
                .filter(|handler| handler.matches_container(&container))
                .count(),
            1
        );
    }

    #[test]
    fn dto_serializes_without_envelope() {
        let dto = ParametersDto::Fivetran(FivetranDto {
            source_type: Some("FIVETRAN".to_owned()),
            host: Some("api.fivetran.com".to_owned()),
        });
        assert_eq!(dto.schema_tag(), "fivetran");
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"type":"FIVETRAN","host":"api.fivetran.com"}"#
        );
    }

    #[test]
    fn handlers_follow_declaration_order() {
        let tags = all_handlers()
            .iter()
            .map(|handler| handler.schema_tag())
            .collect::<Vec<_>>();
        assert_eq!(tags.len(), 19);
        assert_eq!(tags.first(), Some(&"airflow"));
        assert_eq!(tags.last(), Some(&"tableau"));
    }
}

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

//! One module per source type

mod airflow;
mod athena;
mod bigquery;
mod databricks;
mod dbt;
mod dbt_cloud;
mod fivetran;
mod hive;
mod looker;
mod mssql;
mod mysql;
mod oracle;
mod postgresql;
mod power_bi;
mod quicksight;
mod redshift;
mod snowflake;
mod synapse;
mod tableau;

pub use airflow::{AirflowDto, AirflowParameters};
pub use athena::{AthenaDto, AthenaParameters};
pub use bigquery::{BigQueryDto, BigQueryParameters};
pub use databricks::{DatabricksDto, DatabricksParameters};
pub use dbt::{DbtDto, DbtParameters};
pub use dbt_cloud::{DbtCloudDto, DbtCloudParameters};
pub use fivetran::{FivetranDto, FivetranParameters};
pub use hive::{HiveDto, HiveParameters};
pub use looker::{GitConnection, GitConnectionDto, LookerDto, LookerParameters};
pub use mssql::{MssqlDto, MssqlParameters};
pub use mysql::{MysqlDto, MysqlParameters};
pub use oracle::{OracleDto, OracleParameters};
pub use postgresql::{PostgresqlDto, PostgresqlParameters};
pub use power_bi::{PowerBiDto, PowerBiParameters};
pub use quicksight::{QuicksightDto, QuicksightParameters};
pub use redshift::{RedshiftDto, RedshiftParameters};
pub use snowflake::{SnowflakeDto, SnowflakeParameters};
pub use synapse::{SynapseDto, SynapseParameters};
pub use tableau::{TableauDto, TableauParameters};

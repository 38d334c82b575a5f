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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tf_provider::value::{Value, ValueNumber};
use tf_provider::{
    map, Attribute, AttributeConstraint, AttributePath, AttributeType, Description, Diagnostics,
};

use crate::decoder::Discriminable;
use crate::enums::{MysqlTlsVersion, WireEnum};
use crate::error::{Error, Result};
use crate::variant::{
    check_range, missing_fields, present, required_value, Variant, WireDto,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MysqlParameters {
    pub host: Value<String>,
    pub port: ValueNumber,
    pub database: Value<String>,
    pub mysql_tls_version: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MysqlDto {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_tls_version: Option<String>,
}

const TAG: &str = "mysql";

impl Discriminable for MysqlDto {
    fn type_tag(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    fn is_empty(&self) -> bool {
        self.source_type.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.database.is_none()
            && self.mysql_tls_version.is_none()
    }

    fn check(&self) -> std::result::Result<(), String> {
        let missing = [
            (self.host.is_none(), "host"),
            (self.port.is_none(), "port"),
            (self.database.is_none(), "database"),
            (self.mysql_tls_version.is_none(), "mysqlTlsVersion"),
        ]
        .iter()
        .filter_map(|(missing, wire)| missing.then_some(*wire))
        .collect::<Vec<_>>();
        missing_fields(&missing)?;
        match &self.mysql_tls_version {
            Some(version) => MysqlTlsVersion::parse(version)
                .map(|_| ())
                .map_err(|err| err.to_string()),
            None => Ok(()),
        }
    }
}

impl WireDto for MysqlDto {
    fn set_type_tag(&mut self, tag: String) {
        self.source_type = Some(tag);
    }
}

impl Variant for MysqlParameters {
    const TAG: &'static str = TAG;
    const REQUIRES_CREDENTIAL: bool = true;

    type Dto = MysqlDto;

    fn description() -> &'static str {
        "Parameters of a `mysql` source"
    }

    fn attributes() -> HashMap<String, Attribute> {
        map! {
            "host" => Attribute {
                attr_type: AttributeType::String,
                description: Description::plain("Hostname of the MySQL server"),
                constraint: AttributeConstraint::Required,
                ..Default::default()
            },
            "port" => Attribute {
                attr_type: AttributeType::Number,
                description: Description::plain("Port of the MySQL server"),
                constraint: AttributeConstraint::Required,
                ..Default::default()
            },
            "database" => Attribute {
                attr_type: AttributeType::String,
                description: Description::plain("Database to monitor"),
                constraint: AttributeConstraint::Required,
                ..Default::default()
            },
            "mysql_tls_version" => Attribute {
                attr_type: AttributeType::String,
                description: Description::plain(
                    "TLS version used to connect, one of TLS_V_1_2 or TLS_V_1_3",
                ),
                constraint: AttributeConstraint::Required,
                ..Default::default()
            },
        }
    }

    fn to_dto(&self) -> Result<MysqlDto> {
        let tls_version = required_value(TAG, "mysql_tls_version", &self.mysql_tls_version)?;
        Ok(MysqlDto {
            source_type: None,
            host: Some(required_value(TAG, "host", &self.host)?),
            port: Some(required_value(TAG, "port", &self.port)?),
            database: Some(required_value(TAG, "database", &self.database)?),
            mysql_tls_version: Some(MysqlTlsVersion::parse(&tls_version)?.as_str().to_owned()),
        })
    }

    fn from_dto(dto: &MysqlDto) -> Result<Self> {
        let tls_version = dto
            .mysql_tls_version
            .as_deref()
            .ok_or_else(|| Error::malformed(TAG, "missing required field mysqlTlsVersion"))?;
        Ok(Self {
            host: present(TAG, "host", &dto.host)?,
            port: present(TAG, "port", &dto.port)?,
            database: present(TAG, "database", &dto.database)?,
            mysql_tls_version: Value::Value(MysqlTlsVersion::parse(tls_version)?.to_string()),
        })
    }

    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(version) = &self.mysql_tls_version {
            if let Err(err) = MysqlTlsVersion::parse(version) {
                err.report(diags, attr_path.clone().attribute("mysql_tls_version"));
            }
        }
        check_range(&self.port, 1..=65535, diags, attr_path.attribute("port"));
    }
}

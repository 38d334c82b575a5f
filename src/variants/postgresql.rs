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

crate::source_variant! {
    PostgresqlParameters / PostgresqlDto {
        tag: "postgresql",
        requires_credential: true,
        fields: {
            host: String [required] "host" "Hostname of the PostgreSQL server",
            port: i64 [required in 1..=65535] "port" "Port of the PostgreSQL server",
            database: String [required] "database" "Database to monitor",
            schema: String [required] "schema" "Schema to monitor",
        }
    }
}

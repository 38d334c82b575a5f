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
    /// AWS Athena, accessed through an IAM role
    AthenaParameters / AthenaDto {
        tag: "athena",
        requires_credential: false,
        fields: {
            region: String [required] "region" "AWS region of the Athena database",
            role_arn: String [required] "roleArn" "ARN of the IAM role assumed to query Athena",
            database: String [required] "database" "Athena database",
            s3_output_location: String [required] "s3OutputLocation" "S3 location where query results are written",
            workgroup: String [required] "workgroup" "Athena workgroup",
            vpc_url: String [optional] "vpcUrl" "VPC endpoint URL, when Athena is reached through a VPC",
        }
    }
}

// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Env var holding the signing key as a WIF string.
pub const BITJWS_PRIVATE_KEY: &str = "BITJWS_PRIVATE_KEY";
/// Env var holding the path of a file that contains a WIF string.
pub const BITJWS_KEY_FILE: &str = "BITJWS_KEY_FILE";

/// Authorization scheme used for the signed-message header.
pub const BITJWS_SCHEME: &str = "BitJWS";
/// JWS `alg` for secp256k1 ECDSA with SHA-256.
pub const BITJWS_ALGORITHM: &str = "ES256K";
pub(crate) const BITJWS_TYPE: &str = "JWT";

/// Version byte of a mainnet WIF private key.
pub(crate) const WIF_VERSION: u8 = 0x80;
/// Suffix marking a WIF key whose public key is used compressed.
pub(crate) const WIF_COMPRESSED_FLAG: u8 = 0x01;

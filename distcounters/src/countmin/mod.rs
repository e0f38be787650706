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

//! Count-Min sketch for keyless frequency estimation.
//!
//! The Count-Min sketch stores no keys at all: frequency is approximated by
//! hashed counter rows, with configurable relative error and confidence.
//!
//! # Usage
//!
//! ```rust
//! # use distcounters::countmin::CountMinSketch;
//! let mut sketch = CountMinSketch::new(5, 256);
//! sketch.update(&"apple", 1);
//! sketch.update(&"banana", 3);
//! assert!(sketch.query(&"banana") >= 3);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! # use distcounters::countmin::CountMinSketch;
//! let buckets = CountMinSketch::<u64>::suggest_num_buckets(0.01);
//! let hashes = CountMinSketch::<u64>::suggest_num_hashes(0.99);
//! let _sketch = CountMinSketch::<u64>::new(hashes, buckets);
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;

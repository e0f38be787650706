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

//! Closed-form log-normal density evaluation.

use std::f64::consts::SQRT_2;

/// Standard normal CDF.
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / SQRT_2))
}

/// CDF of a log-normal with log-space mean `mu` and log-space standard
/// deviation `sigma`, evaluated at `x`.
fn log_normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    standard_normal_cdf((x.ln() - mu) / sigma)
}

/// Probability mass the log-normal assigns to the interval `[lo, hi)`.
pub(super) fn log_normal_mass(lo: f64, hi: f64, mu: f64, sigma: f64) -> f64 {
    log_normal_cdf(hi, mu, sigma) - log_normal_cdf(lo, mu, sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_midpoint_at_scale() {
        // the median of a log-normal is e^mu
        let mu: f64 = 1.25;
        let median = mu.exp();
        assert!((log_normal_cdf(median, mu, 0.7) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cdf_is_monotone() {
        let mut last = 0.0;
        for i in 1..200 {
            let x = i as f64 * 0.25;
            let value = log_normal_cdf(x, 0.4, 1.1);
            assert!(value >= last);
            last = value;
        }
        assert!(last <= 1.0);
    }

    #[test]
    fn cdf_is_zero_at_or_below_zero() {
        assert_eq!(log_normal_cdf(0.0, 0.0, 1.0), 0.0);
        assert_eq!(log_normal_cdf(-3.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn interval_masses_cover_the_support() {
        let (mu, sigma) = (0.8, 0.6);
        let mut total = 0.0;
        for i in 0..10_000 {
            total += log_normal_mass(i as f64 * 0.1, (i + 1) as f64 * 0.1, mu, sigma);
        }
        assert!((total - 1.0).abs() < 1e-6);
        assert!(log_normal_mass(0.5, 1.5, mu, sigma) > 0.0);
    }
}

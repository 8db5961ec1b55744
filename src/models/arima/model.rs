//! ARIMA (Autoregressive Integrated Moving Average) model.

use chrono::{Duration, NaiveDate};

use crate::core::{Forecast, TrainingWindow};
use crate::error::{EpiError, Result};
use crate::models::arima::diff::{difference, integrate, undifference_seeds};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{mean, quantile_normal, variance};
use crate::validation::ljung_box;

/// ARIMA model specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ARIMASpec {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ARIMASpec {
    /// Create a new ARIMA specification.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Number of estimated parameters: AR + MA + intercept.
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }

    /// Smallest training window the specification can be fit on.
    ///
    /// One point beyond p + d + q, so that after differencing at least one
    /// observation has a full lag history.
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl Default for ARIMASpec {
    fn default() -> Self {
        Self::new(5, 1, 0)
    }
}

/// A fitted ARIMA(p, d, q) model.
///
/// Combines an autoregressive part over the differenced series, `d` rounds
/// of differencing and a moving-average part over one-step errors.
/// Parameters are estimated by conditional least squares. A fitted model is
/// immutable: forecasting never changes it, and refitting the same window
/// reproduces the same model.
#[derive(Debug, Clone)]
pub struct ARIMA {
    spec: ARIMASpec,
    window: TrainingWindow,
    ar_coefficients: Vec<f64>,
    ma_coefficients: Vec<f64>,
    intercept: f64,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
    residual_variance: f64,
    seeds: Vec<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl ARIMA {
    /// Fit the model to a training window by conditional least squares.
    ///
    /// The window must hold more than p + d + q points and must not be
    /// constant; both cases are rejected before any estimation runs.
    pub fn fit(window: &TrainingWindow, spec: ARIMASpec) -> Result<Self> {
        let values = window.values();
        if values.len() < spec.min_observations() {
            return Err(EpiError::InsufficientData {
                needed: spec.min_observations(),
                got: values.len(),
            });
        }
        if variance(values) == 0.0 {
            return Err(EpiError::DegenerateSeries);
        }

        let differenced = difference(values, spec.d);
        let (intercept, ar_coefficients, ma_coefficients) = estimate(&differenced, spec)?;

        let start = spec.p.max(spec.q);
        let mut residuals = vec![0.0; differenced.len()];
        let mut sum_sq = 0.0;
        for t in start..differenced.len() {
            let pred = one_step_prediction(
                &differenced,
                &residuals,
                t,
                &ar_coefficients,
                &ma_coefficients,
                intercept,
            );
            let error = differenced[t] - pred;
            residuals[t] = error;
            sum_sq += error * error;
        }
        let n_eff = (differenced.len() - start) as f64;
        let residual_variance = sum_sq / n_eff;

        // Gaussian log-likelihood criteria; undefined on an exact fit.
        let (aic, bic) = if residual_variance > 0.0 {
            let k = spec.num_params() as f64;
            let ll = -0.5
                * n_eff
                * (1.0 + residual_variance.ln() + (2.0 * std::f64::consts::PI).ln());
            (Some(-2.0 * ll + 2.0 * k), Some(-2.0 * ll + k * n_eff.ln()))
        } else {
            (None, None)
        };

        Ok(Self {
            spec,
            window: window.clone(),
            ar_coefficients,
            ma_coefficients,
            intercept,
            differenced,
            residuals,
            residual_variance,
            seeds: undifference_seeds(values, spec.d),
            aic,
            bic,
        })
    }

    /// Forecast `horizon` days beyond the end of the training window.
    pub fn forecast(&self, horizon: usize) -> Result<Forecast> {
        if horizon == 0 {
            return Err(EpiError::InvalidArgument(
                "forecast horizon must be at least 1".to_string(),
            ));
        }

        let values = integrate(&self.forecast_differenced(horizon), &self.seeds);
        Forecast::from_values(self.future_dates(horizon), values)
    }

    /// Forecast with symmetric normal prediction intervals.
    ///
    /// `level` is the coverage probability, e.g. 0.95. Interval width grows
    /// with the square root of the step, matching random-walk accumulation
    /// of the one-step error variance.
    pub fn forecast_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        if !(level > 0.0 && level < 1.0) {
            return Err(EpiError::InvalidArgument(format!(
                "interval level must be in (0, 1), got {level}"
            )));
        }

        let point = self.forecast(horizon)?;
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &value) in point.values().iter().enumerate() {
            let se = (self.residual_variance * (h + 1) as f64).sqrt();
            lower.push(value - z * se);
            upper.push(value + z * se);
        }

        Forecast::from_values_with_intervals(
            point.dates().to_vec(),
            point.values().to_vec(),
            lower,
            upper,
        )
    }

    /// The model specification.
    pub fn spec(&self) -> ARIMASpec {
        self.spec
    }

    /// The training window the model was fit on.
    pub fn window(&self) -> &TrainingWindow {
        &self.window
    }

    /// Estimated AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// Estimated MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coefficients
    }

    /// Estimated intercept on the differenced scale.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Mean squared one-step error on the differenced scale.
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// One-step residuals, skipping warmup positions without a full lag
    /// history.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals[self.spec.p.max(self.spec.q)..]
    }

    /// In-sample one-step predictions on the differenced scale, aligned
    /// with [`residuals`](Self::residuals).
    pub fn fitted_differenced(&self) -> Vec<f64> {
        let start = self.spec.p.max(self.spec.q);
        self.differenced[start..]
            .iter()
            .zip(&self.residuals[start..])
            .map(|(value, residual)| value - residual)
            .collect()
    }

    /// Akaike information criterion, when the fit left residual variance to
    /// score.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Bayesian information criterion, when the fit left residual variance
    /// to score.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Multi-line description of the fit: coefficient table in the usual
    /// ar.L1/ma.L1/sigma2 labelling, information criteria and a Ljung-Box
    /// check of the residuals.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "ARIMA({},{},{}) fit on {} observations ending {}\n",
            self.spec.p,
            self.spec.d,
            self.spec.q,
            self.window.len(),
            self.window.last_date(),
        ));

        out.push_str(&format!("  {:<10} {:>14.6}\n", "intercept", self.intercept));
        for (i, phi) in self.ar_coefficients.iter().enumerate() {
            out.push_str(&format!("  {:<10} {:>14.6}\n", format!("ar.L{}", i + 1), phi));
        }
        for (i, theta) in self.ma_coefficients.iter().enumerate() {
            out.push_str(&format!("  {:<10} {:>14.6}\n", format!("ma.L{}", i + 1), theta));
        }
        out.push_str(&format!(
            "  {:<10} {:>14.6}\n",
            "sigma2", self.residual_variance
        ));

        match (self.aic, self.bic) {
            (Some(aic), Some(bic)) => {
                out.push_str(&format!("AIC: {aic:.2}  BIC: {bic:.2}\n"));
            }
            _ => out.push_str("AIC: n/a  BIC: n/a\n"),
        }

        match ljung_box(self.residuals(), 10, self.spec.p + self.spec.q) {
            Some(test) => out.push_str(&format!(
                "Ljung-Box (lag {}): Q = {:.2}, p = {:.3}\n",
                test.lags, test.statistic, test.p_value
            )),
            None => out.push_str("Ljung-Box: n/a\n"),
        }

        out
    }

    /// Run the ARMA recursion past the end of the differenced series.
    ///
    /// Future shocks are unknown and enter the recursion as zero.
    fn forecast_differenced(&self, horizon: usize) -> Vec<f64> {
        let mut series = self.differenced.clone();
        let mut residuals = self.residuals.clone();
        for _ in 0..horizon {
            let pred = one_step_prediction(
                &series,
                &residuals,
                series.len(),
                &self.ar_coefficients,
                &self.ma_coefficients,
                self.intercept,
            );
            series.push(pred);
            residuals.push(0.0);
        }
        series.split_off(self.differenced.len())
    }

    fn future_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        let last = self.window.last_date();
        (1..=horizon as i64).map(|i| last + Duration::days(i)).collect()
    }
}

/// Estimate intercept and AR/MA coefficients on the differenced scale.
fn estimate(differenced: &[f64], spec: ARIMASpec) -> Result<(f64, Vec<f64>, Vec<f64>)> {
    let (p, q) = (spec.p, spec.q);
    let series_mean = mean(differenced);

    // Pure intercept models need no search.
    if p == 0 && q == 0 {
        return Ok((series_mean, vec![], vec![]));
    }

    let mut initial = vec![0.0; spec.num_params()];
    initial[0] = series_mean;
    for i in 0..p {
        initial[1 + i] = 0.1 / (i + 1) as f64;
    }
    for i in 0..q {
        initial[1 + p + i] = 0.1 / (i + 1) as f64;
    }

    // Intercept is free; AR and MA coefficients stay strictly inside the
    // unit interval for stationarity and invertibility.
    let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
    bounds.resize(spec.num_params(), (-0.99, 0.99));

    let config = NelderMeadConfig {
        max_iter: 400 * spec.num_params(),
        ..Default::default()
    };
    let result = nelder_mead(
        |params| css(differenced, spec, params),
        &initial,
        Some(&bounds),
        config,
    );
    if !result.converged {
        return Err(EpiError::Convergence {
            iterations: result.iterations,
        });
    }

    let intercept = result.point[0];
    let ar = result.point[1..1 + p].to_vec();
    let ma = result.point[1 + p..].to_vec();
    Ok((intercept, ar, ma))
}

/// Conditional sum of squared one-step errors for a parameter vector laid
/// out as [intercept, ar.., ma..].
fn css(differenced: &[f64], spec: ARIMASpec, params: &[f64]) -> f64 {
    let n = differenced.len();
    let start = spec.p.max(spec.q);
    if n <= start {
        return f64::MAX;
    }

    let intercept = params[0];
    let ar = &params[1..1 + spec.p];
    let ma = &params[1 + spec.p..];

    let mut residuals = vec![0.0; n];
    let mut total = 0.0;
    for t in start..n {
        let error = differenced[t] - one_step_prediction(differenced, &residuals, t, ar, ma, intercept);
        residuals[t] = error;
        total += error * error;
    }
    total
}

/// One-step prediction at index `t`, which must have at least `max(p, q)`
/// points of history in both `series` and `residuals`.
fn one_step_prediction(
    series: &[f64],
    residuals: &[f64],
    t: usize,
    ar: &[f64],
    ma: &[f64],
    intercept: f64,
) -> f64 {
    let mut pred = intercept;
    for (i, phi) in ar.iter().enumerate() {
        pred += phi * (series[t - 1 - i] - intercept);
    }
    for (i, theta) in ma.iter().enumerate() {
        pred += theta * residuals[t - 1 - i];
    }
    pred
}

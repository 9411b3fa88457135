use std::f64::consts::E;

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid expressed through its output.
///
/// `y` must already be a sigmoid activation, i.e. `y = sigmoid(x)`; passing a
/// pre-activation value gives a meaningless slope.
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Unit step: 0 below zero, 1 above, `at_zero` exactly at zero.
pub fn heaviside(x: f64, at_zero: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 0.0 {
        1.0
    } else {
        at_zero
    }
}

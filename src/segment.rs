/// Cubic piece of the spline on `[x0, x1]`, described by its end values and end second
/// derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CubicSegment {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub gamma0: f64,
    pub gamma1: f64,
    pub h: f64,
}

impl CubicSegment {
    pub fn evaluate(&self, x: f64) -> f64 {
        let left = self.x1 - x;
        let right = x - self.x0;
        let h = self.h;

        self.y0 * left / h
            + self.y1 * right / h
            + self.gamma0 * left * (left * left - h * h) / (6.0 * h)
            + self.gamma1 * right * (right * right - h * h) / (6.0 * h)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let left = self.x1 - x;
        let right = x - self.x0;
        let h = self.h;

        (self.y1 - self.y0) / h
            + self.gamma0 * (h * h - 3.0 * left * left) / (6.0 * h)
            + self.gamma1 * (3.0 * right * right - h * h) / (6.0 * h)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        (self.gamma0 * (self.x1 - x) + self.gamma1 * (x - self.x0)) / self.h
    }
}

extern crate tridiagonal_spline;

use tridiagonal_spline::{BoundaryCondition, CubicSpline};

fn main() {
    env_logger::init();

    let xs = [0.0, 1.0, 2.0, 4.0, 5.0, 6.0];
    let ys = [1.0, -1.0, 0.0, 3.0, 1.0, 1.0];

    let spline = CubicSpline::from_xy(&xs, &ys, BoundaryCondition::Natural).unwrap();

    let (x_min, x_max) = spline.domain();
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let x_vector: Vec<f64> = (0..=number_of_steps)
        .map(|i| (x_min + step * i as f64).min(x_max))
        .collect();

    let result = spline.batch_evaluate(&x_vector).unwrap();

    println!("x;y");
    for (x, y) in x_vector.iter().zip(result) {
        println!("{:.2};{:.4}", x, y);
    }
}

extern crate tridiagonal_spline;

use tridiagonal_spline::{BoundaryCondition, CubicSpline, Node};

fn main() {
    env_logger::init();

    let nodes = vec![
        Node::new(1.0, 1.0),
        Node::new(2.0, 0.0),
        Node::new(3.0, -2.0),
        Node::new(4.0, 1.0),
        Node::new(5.0, 1.0)
    ];

    let spline = CubicSpline::new(&nodes, BoundaryCondition::clamped(0.0, -1.0)).unwrap();

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.4}", x, spline.extrapolate(x));
    }
}

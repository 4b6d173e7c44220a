extern crate tridiagonal_spline;

use tridiagonal_spline::{build_spline, BoundaryCondition, Node};

fn main() {
    env_logger::init();

    let nodes = vec![
        Node::new(-1.0, 1.0),
        Node::new(0.0, 2.0),
        Node::new(2.0, 4.0),
        Node::new(3.0, 1.0),
        Node::new(5.0, -3.0)
    ];

    let (spline, gamma) = build_spline(&nodes, BoundaryCondition::Natural).unwrap();
    eprintln!("gamma: {:?}", gamma.as_slice());

    let (x_min, x_max) = spline.domain();
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!("{:.2};{:.4}", x, spline.evaluate(x.min(x_max)).unwrap());
    }
}

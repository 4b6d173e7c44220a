//! Interpolates f(x) = |x| on [-1, 1] with a natural spline through `n` uniform nodes
//! and prints the spline next to the function. Usage: `cargo run --example abs_function -- 7`

extern crate tridiagonal_spline;

use std::{env, error::Error};

use tridiagonal_spline::{BoundaryCondition, CubicSpline, Node};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let number_of_nodes: usize = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 5,
    };
    if number_of_nodes < 2 {
        return Err("number of nodes must be at least 2".into());
    }

    let x_min = -1.0;
    let x_max = 1.0;
    let node_step = (x_max - x_min) / (number_of_nodes - 1) as f64;

    let nodes: Vec<Node> = (0..number_of_nodes)
        .map(|i| {
            let x = x_min + node_step * i as f64;
            Node::new(x, x.abs())
        })
        .collect();

    let spline = CubicSpline::new(&nodes, BoundaryCondition::Natural)?;
    eprintln!("gamma: {:?}", spline.gamma().as_slice());

    let (x_min, x_max) = spline.domain();
    let number_of_steps = 100;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;f;spline;error");
    for i in 0..=number_of_steps {
        let x = (x_min + step * i as f64).min(x_max);
        let y = spline.evaluate(x)?;
        println!("{:.3};{:.4};{:.4};{:.2e}", x, x.abs(), y, (y - x.abs()).abs());
    }
    Ok(())
}

//! Print DE-9IM matrices for a few square arrangements.
//!
//! Usage:
//!   cargo run -p georelate --example relate_squares
//!   cargo run -p georelate --example relate_squares -- 0.5
//!
//! The optional argument is the x offset of the second unit square.

use georelate::prelude::*;

fn square(x0: f64, y0: f64, side: f64) -> Geometry {
    let c = Coordinate::new;
    Geometry::Polygon(Polygon::new(
        vec![
            c(x0, y0),
            c(x0 + side, y0),
            c(x0 + side, y0 + side),
            c(x0, y0 + side),
            c(x0, y0),
        ],
        Vec::new(),
    ))
}

fn main() {
    let offsets: Vec<f64> = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(dx) => vec![dx],
            Err(_) => {
                eprintln!("usage: relate_squares [x-offset]");
                return;
            }
        },
        None => vec![-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0],
    };
    let a = square(0.0, 0.0, 1.0);
    for dx in offsets {
        let b = square(dx, 0.0, 1.0);
        match relate(&a, &b) {
            Ok(im) => println!(
                "dx={dx:+.2}: {im}  intersects={} touches={}",
                im.matches("T********").unwrap_or(false)
                    || im.matches("*T*******").unwrap_or(false)
                    || im.matches("***T*****").unwrap_or(false)
                    || im.matches("****T****").unwrap_or(false),
                im.matches("FT*******").unwrap_or(false)
                    || im.matches("F**T*****").unwrap_or(false)
                    || im.matches("F***T****").unwrap_or(false),
            ),
            Err(e) => eprintln!("dx={dx:+.2}: {e}"),
        }
    }
}

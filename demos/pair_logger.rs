//! Feeds a noisy linear signal through the accumulator the way a periodic
//! sensor-logging loop would, then prints the fit.
//!
//! Run with `cargo run --example pair_logger`.

use correlation::Correlation;

fn main() {
    let mut corr = Correlation::<20>::new();
    corr.set_running(true);

    // y = 3 + 0.5 x, with a small alternating disturbance
    for i in 0..40 {
        let x = i as f32;
        let noise = if i % 2 == 0 { 0.05 } else { -0.05 };
        corr.add(x, 3.0 + 0.5 * x + noise);
    }

    if !corr.calculate() {
        eprintln!("no samples stored");
        return;
    }

    println!("samples     : {}", corr.count());
    println!(
        "x range     : {:.1} ..= {:.1}",
        corr.min_x().unwrap_or(f32::NAN),
        corr.max_x().unwrap_or(f32::NAN)
    );
    println!("intercept a : {:.3}", corr.a());
    println!("slope b     : {:.3}", corr.b());
    println!("r           : {:.4}", corr.r());
    println!("e^2         : {:.4}", corr.e_squared());
    println!("y(50)       : {:.2}", corr.estimate_y(50.0));
    println!("x(y=28)     : {:.2}", corr.estimate_x(28.0));
}

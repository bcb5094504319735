use puzzlebot_kinematics::*;

fn main() {
    let simulator = Simulator::default();
    let kinematics = simulator.drive();
    let command = ChassisSpeeds::new(0.2, 0.0); // 0.2 m/s forward, 0 rad/s turning

    println!("Initializing simulation...");
    println!("  Differential Drive Parameters:");
    println!("    Wheel Radius:     {} m", kinematics.wheel_radius());
    println!("    Wheel Separation: {} m", kinematics.wheel_separation());
    println!("  Command:            {}", command);
    println!("  Wheel Speeds:       {}", kinematics.inverse_kinematics(command));
    println!("  Simulation Settings:");
    println!("    Time Step:    {} s", simulator.dt());
    println!("    Num Steps:    {}", simulator.step_count());
    println!("\nSimulating...");

    let trajectory = simulator.run(command);
    for (i, sample) in trajectory.iter().enumerate().step_by(10) {
        println!("Step {:>3}: t = {:>4.1} s, Pose: {}", i + 1, sample.time, sample.pose);
    }

    println!("\nSimulation complete.");
    if let Some(last) = trajectory.last() {
        println!("Final Pose: {:?}", last.pose);
        println!(
            "Wheel rotation: right {:.2} rad, left {:.2} rad",
            last.wheel_angles.right, last.wheel_angles.left
        );
    }

    println!("\nSolving for target (1.0, 1.0) over {} s...", simulator.duration());
    match solve_endpoint(1.0, 1.0, simulator.duration()) {
        Ok(speeds) => {
            let end = simulator.run(speeds);
            if let Some(last) = end.last() {
                println!("Command {} ends at {}", speeds, last.pose);
            }
        }
        Err(e) => eprintln!("Failed to solve endpoint: {}", e),
    }
}

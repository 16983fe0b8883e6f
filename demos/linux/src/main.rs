use log::info;
use sht31_i2c::error::SHTError;
use sht31_i2c::prelude::*;
use std::{env, process};

fn arg(args: &[String], index: usize, default: u8) -> u8 {
    match args.get(index) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("usage: {} [bus] [device index]", args[0]);
            process::exit(1);
        }),
        None => default,
    }
}

fn run(bus: u8, device_index: u8) -> Result<(), SHTError> {
    info!("Initializing SHT31 on bus {}", bus);
    let mut sht = SHT31::open(bus, device_index)?;

    println!("Heater on: {}", sht.is_heater_on()?);
    sht.heater_on()?;
    println!("Heater on: {}", sht.is_heater_on()?);
    sht.heater_off()?;
    println!("Heater on: {}", sht.is_heater_on()?);

    let reading = sht.measure(TemperatureUnit::Celsius)?;
    println!("Temperature C: {}", reading.temperature);
    println!("Humidity: {}", reading.humidity);

    let reading = sht.measure(TemperatureUnit::Fahrenheit)?;
    println!("Temperature F: {}", reading.temperature);
    println!("Humidity: {}", reading.humidity);

    sht.close();
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let bus = arg(&args, 1, 1);
    let device_index = arg(&args, 2, 0);

    if let Err(e) = run(bus, device_index) {
        eprintln!("{}", e);
        if matches!(
            e,
            SHTError::OpenI2CError { .. } | SHTError::ReadI2CError | SHTError::WriteI2CError
        ) {
            eprintln!("Error creating connection to i2c. This must be run as root");
        }
        process::exit(1);
    }
}

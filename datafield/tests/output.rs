use clap::Parser;
use datafield::{run, Command};
use field::{Config, Preset, Variant};

fn command(args: &[&str]) -> Command {
	Command::parse_from(std::iter::once("simulate").chain(args.iter().copied()))
}

#[test]
fn statistics_as_json() {
	let dir = tempfile::tempdir().unwrap();
	let output = dir.path().join("statistics.json");
	let statistics = run(command(&[
		"--preset",
		"landing",
		"--frames",
		"50",
		"--seed",
		"1",
		"--output",
		output.to_str().unwrap(),
	]))
	.unwrap();

	let json: serde_json::Value = serde_json::from_reader(std::fs::File::open(&output).unwrap()).unwrap();
	assert_eq!(json["variant"], "sphere-shell");
	assert_eq!(json["points"], 150);
	assert_eq!(json["frames"], 50);
	assert_eq!(json["links"].as_u64().unwrap() as usize, statistics.links);
	assert!(statistics.links > 0);
}

#[test]
fn frame_as_json() {
	let dir = tempfile::tempdir().unwrap();
	let output = dir.path().join("frame.json");
	run(command(&[
		"--preset",
		"contact",
		"--frames",
		"5",
		"--count",
		"40",
		"--pointer",
		"idle",
		"--frame-output",
		output.to_str().unwrap(),
	]))
	.unwrap();

	let json: serde_json::Value = serde_json::from_reader(std::fs::File::open(&output).unwrap()).unwrap();
	assert_eq!(json["positions"].as_array().unwrap().len(), 40);
	assert_eq!(json["sizes"].as_array().unwrap().len(), 40);
	assert_eq!(json["colors"].as_array().unwrap().len(), 40);
	assert!(json["edges"].as_array().unwrap().iter().all(|edge| edge[0].as_u64() < edge[1].as_u64()));
}

#[test]
fn configuration_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("field.json");
	let config = Config { variant: Variant::RandomScatter, count: 25, seed: Some(2), ..Preset::Demo.config() };
	config.save(&path).unwrap();

	let saved = dir.path().join("used.json");
	let statistics = run(command(&[
		"--config",
		path.to_str().unwrap(),
		"--pointer",
		"far",
		"--frames",
		"30",
		"--save-config",
		saved.to_str().unwrap(),
	]))
	.unwrap();
	assert_eq!(statistics.variant, "random-scatter");
	assert_eq!(statistics.points, 25);
	assert_eq!(Config::from_file(&saved).unwrap(), config);
}

#[test]
fn invalid_configuration_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("field.json");
	std::fs::write(&path, r#"{ "damping": 1.5 }"#).unwrap();
	let result = run(command(&["--config", path.to_str().unwrap()]));
	assert!(matches!(result, Err(datafield::Error::Field(field::Error::Damping(_)))));

	let result = run(command(&["--config", dir.path().join("missing.json").to_str().unwrap()]));
	assert!(result.is_err());
}

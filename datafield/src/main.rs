use std::io::Write;

use clap::{CommandFactory, Parser};
use colored::Colorize;

fn main() {
	env_logger::init();

	let res = if std::env::args().len() > 1 {
		cli()
	} else {
		interactive()
	};
	if let Err(err) = res {
		println!("{} {}", "Error:".red(), err);
	}
}

fn interactive() -> Result<(), datafield::Error> {
	let mut c = InteractiveCommand::command();
	c.print_help()?;

	loop {
		print!("{}", "\n=> ".bold().green());
		std::io::stdout().flush()?;

		let mut line = String::from("datafield ");
		if std::io::stdin().read_line(&mut line)? == 0 {
			break;
		}
		match InteractiveCommand::try_parse_from(line.split_whitespace()) {
			Ok(InteractiveCommand::Simulate(command)) => match datafield::run(command) {
				Ok(statistics) => statistics.print(),
				Err(err) => println!("{} {}", "Error:".red(), err),
			},
			Ok(InteractiveCommand::Presets) => datafield::presets(),
			Ok(InteractiveCommand::Quit) => break,
			Err(err) => err.print()?,
		}
	}
	Ok(())
}

fn cli() -> Result<(), datafield::Error> {
	match Command::parse() {
		Command::Simulate(command) => datafield::run(command)?.print(),
		Command::Presets => datafield::presets(),
	}
	Ok(())
}

#[derive(clap::Parser)]
#[command(arg_required_else_help = false)]
enum InteractiveCommand {
	/// Run a particle field without a window
	Simulate(datafield::Command),
	/// List presets and variants
	Presets,
	/// Quit application
	Quit,
}

#[derive(clap::Parser)]
#[command(version, about = "Mouse reactive particle fields, simulated headless")]
enum Command {
	/// Run a particle field without a window
	Simulate(datafield::Command),
	/// List presets and variants
	Presets,
}

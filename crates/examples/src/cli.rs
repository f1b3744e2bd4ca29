use anyhow::Result;
use clap::{Arg, ArgAction, Args, Command, FromArgMatches};
use keccak_gf2_frontend::{compiler::CircuitBuilder, stat::CircuitStat};

use crate::{ExampleCircuit, check_constraints};

/// A CLI builder for circuit examples that handles all command-line parsing and execution.
///
/// Implement [`ExampleCircuit`], derive [`Args`] for its `Params` and `Instance`, then call
/// `Cli::<MyExample>::new("name").run()` from `main`.
pub struct Cli<E: ExampleCircuit> {
	command: Command,
	_phantom: std::marker::PhantomData<E>,
}

impl<E: ExampleCircuit> Cli<E>
where
	E::Params: Args,
	E::Instance: Args,
{
	/// Create a new CLI for the given circuit example.
	///
	/// The `name` parameter sets the command name (shown in help and usage).
	pub fn new(name: &'static str) -> Self {
		let mut command = Command::new(name);

		command = command.arg(
			Arg::new("stat")
				.long("stat")
				.action(ArgAction::SetTrue)
				.help("Print gate and constraint statistics of the built circuit"),
		);

		command = E::Params::augment_args(command);
		command = E::Instance::augment_args(command);

		Self {
			command,
			_phantom: std::marker::PhantomData,
		}
	}

	/// Set the about/description text for the command.
	pub fn about(mut self, about: &'static str) -> Self {
		self.command = self.command.about(about);
		self
	}

	fn run_with_matches(matches: clap::ArgMatches) -> Result<()> {
		let print_stat = matches.get_flag("stat");
		let params = E::Params::from_arg_matches(&matches)?;
		let instance = E::Instance::from_arg_matches(&matches)?;

		let build_scope = tracing::info_span!("Building circuit").entered();
		let builder = CircuitBuilder::new();
		let example = E::build(params, &builder)?;
		let circuit = builder.build();
		drop(build_scope);

		if print_stat {
			print!("{}", CircuitStat::collect(&circuit));
		}

		let witness_population = tracing::info_span!("Generating witness").entered();
		let mut filler = circuit.new_witness_filler();
		tracing::info_span!("Input population")
			.in_scope(|| example.populate_witness(instance, &mut filler))?;
		tracing::info_span!("Circuit evaluation")
			.in_scope(|| circuit.populate_wire_witness(&mut filler))?;
		let witness = filler.into_value_vec();
		drop(witness_population);

		let cs = circuit.constraint_system();
		check_constraints(&cs, &witness)
	}

	/// Parse arguments and run the circuit example.
	///
	/// Builds the circuit, fills the witness from the instance, evaluates every gate and checks
	/// the result against the constraint system.
	pub fn run(self) -> Result<()> {
		let matches = self.command.get_matches();
		Self::run_with_matches(matches)
	}

	/// Parse arguments and run with custom argument strings (useful for testing).
	pub fn run_from<I, T>(self, args: I) -> Result<()>
	where
		I: IntoIterator<Item = T>,
		T: Into<std::ffi::OsString> + Clone,
	{
		let matches = self.command.try_get_matches_from(args)?;
		Self::run_with_matches(matches)
	}
}

//! Print the aliases of a name, like `hostname -a`.

use std::env;
use std::process;

fn main() {
    env_logger::init();

    // Get the arguments/name to lookup.
    let mut args = env::args();
    let program_name = args.next().unwrap();

    let name = match args.next() {
        Some(name) => name,
        None => {
            eprintln!("Usage: {} <name> [hosts-file]", program_name);
            process::exit(1);
        }
    };

    // Resolve from a hosts table if one was given, otherwise ask the system.
    match args.next() {
        Some(path) => {
            let hosts = hostname_alias::HostsFile::open(path);
            hostname_alias::hostname_alias_with(&hosts, &name)
        }
        None => hostname_alias::hostname_alias(&name),
    }
}

//! Print every name in the local hosts table along with the address it points to.

use std::fs;
use std::process;

fn main() {
    let path = host_table::hosts_path();

    let table = match fs::read_to_string(path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Failed to read {}: {}", path.display(), err);
            process::exit(1);
        }
    };

    println!("Host table from {}", path.display());

    for entry in host_table::entries(&table) {
        for name in entry.names() {
            println!("  {:<30} points to {}", name, entry.address());
        }
    }
}

//! Interactive facade over the engine. Reads commands from stdin, renders
//! every domain error as a message and keeps going; the engine itself
//! never prints.

use std::io::{self, BufRead, Write};

use treefs_kit::{FsError, TreeFS};

fn main() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut fs = TreeFS::new();

    loop {
        write!(out, "{}> ", fs.pwd())?;
        out.flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break; // EOF
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        if command == "exit" || command == "quit" {
            break;
        }
        if let Err(e) = run(&mut fs, command, args) {
            println!("error: {e}");
        }
    }
    Ok(())
}

/// Executes a single command. Every domain error bubbles up to the loop.
fn run(fs: &mut TreeFS, command: &str, args: &[&str]) -> Result<(), FsError> {
    match (command, args) {
        ("cd", [path]) => fs.cd(path)?,
        ("pwd", []) => println!("{}", fs.pwd()),
        ("ls", []) => println!("{}", fs.ls().join("\t")),
        ("mkdir", [path]) => fs.mkdir(path)?,
        ("touch", [path]) => fs.mkfile(path, None)?,
        ("cat", [path]) => println!("{}", fs.read(path)?),
        ("write", [path, rest @ ..]) => fs.write(path, &rest.join(" "))?,
        ("append", [path, rest @ ..]) => fs.append(path, &rest.join(" "))?,
        ("rm", [path]) => fs.rm(path)?,
        ("mv", [from, to]) => fs.mv(from, to)?,
        ("cp", [from, to]) => fs.cp(from, to)?,
        ("find", [name]) => print_listing(fs.find(name)),
        ("glob", [pattern]) => print_listing(fs.find_matching(pattern)?),
        ("tree", []) => print_listing(fs.tree(".")?),
        ("tree", [path]) => print_listing(fs.tree(path)?),
        _ => help(),
    }
    Ok(())
}

fn print_listing(entries: Vec<String>) {
    if entries.is_empty() {
        println!("not found");
    } else {
        println!("{}", entries.join("\n"));
    }
}

fn help() {
    println!(
        "commands: cd pwd ls mkdir touch cat write append rm mv cp find glob tree exit"
    );
}

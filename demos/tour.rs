//! Scripted tour of the engine: builds a tree, navigates it, then
//! exercises remove, move, read/write, search and both flavors of copy.

use treefs_kit::TreeFS;

fn main() -> anyhow::Result<()> {
    let mut fs = TreeFS::new();

    println!("==== Make some directories and files ====");
    fs.mkdir("documents")?;
    fs.mkfile("temp_file1", None)?;
    fs.mkfile("random_doc", None)?;
    fs.mkfile("system_file", None)?;
    fs.mkdir("system")?;
    println!("{}", fs.ls().join("\t"));

    fs.cd("documents")?;
    fs.mkdir("dev")?;
    fs.mkfile("some_test1", None)?;
    fs.cd("dev")?;
    fs.mkdir("source_code")?;
    fs.cd("source_code")?;
    println!("{}", fs.pwd());
    fs.cd("..")?;
    println!("{}", fs.pwd());
    fs.cd("/system")?;
    println!("{}", fs.pwd());
    fs.mkdir("ui/bad_code/tests")?;
    fs.mkfile("ui/bad_code/tests/some_test1", None)?;

    // `.` and `..` mix freely with named components
    fs.cd("ui/bad_code/tests/../.././bad_code/tests")?;
    fs.mkfile("ui/bad_code/tests/some_test1", None)?;

    fs.cd("/")?;
    println!("{}", fs.ls().join("\t"));

    println!("==== Remove temp_file1 ====");
    fs.rm("temp_file1")?;
    println!("{}", fs.ls().join("\t"));

    println!("==== Move random_doc to /documents ====");
    fs.mv("random_doc", "documents")?;
    fs.cd("documents")?;
    println!("{}", fs.ls().join("\t"));

    println!("==== Read and write files ====");
    fs.write("/system_file", "abcde")?;
    println!("{}", fs.read("/system_file")?);

    println!("==== Search for some_test1 ====");
    fs.cd("/")?;
    for path in fs.find("some_test1") {
        println!("{path}");
    }

    println!("==== Copy a single file ====");
    fs.mkfile("/core_dump_f", None)?;
    fs.cd("/")?;
    println!("{}", fs.ls().join("\t"));

    fs.cp("/core_dump_f", "core_dump_new_f")?;
    println!("{}", fs.ls().join("\t"));

    println!("==== Copy a directory ====");
    fs.cp("/documents", "backup_documents")?;
    fs.cd("/backup_documents")?;
    println!("{}", fs.ls().join("\t"));

    println!("==== Copy with duplicate names ====");
    fs.cp("/system_file", "/documents/some_test1")?;
    fs.cd("/documents")?;
    println!("{}", fs.ls().join("\t"));

    Ok(())
}

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let path_arg = |arg: clap::Arg| arg.value_parser(clap::value_parser!(std::path::PathBuf));

    let mut cmd = clap::Command::new("summarist")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Summarist Contributors")
        .about("Hand a CMS article to an AI chat for summarizing")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(--"page-url" <URL> "Address of the page").value_name("URL"))
        .arg(path_arg(clap::arg!(-c --config <FILE> "Config file").value_name("FILE")))
        .arg(clap::arg!(--"post-id" <ID> "Post ID for the REST lookup").value_name("ID"))
        .arg(clap::arg!(--"rest-url" <URL> "REST API root").value_name("URL"))
        .arg(clap::arg!(--nonce <NONCE> "Nonce sent with the REST lookup"))
        .arg(path_arg(
            clap::arg!(--"editor-state" <FILE> "File holding the editor's unsaved post content").value_name("FILE"),
        ))
        .arg(path_arg(
            clap::arg!(--preview <FILE> "File holding the page-builder preview document").value_name("FILE"),
        ))
        .arg(clap::arg!(--"deadline-ms" <MS> "Time budget for finding content, in milliseconds"))
        .arg(clap::arg!(--"dry-run" "Print the chat URL instead of opening it"))
        .arg(clap::arg!(--"print-prompt" "Print the full clipboard prompt on stdout"))
        .arg(clap::arg!(--"no-clipboard" "Do not write to the system clipboard"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "summarist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "summarist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "summarist", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "summarist", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}

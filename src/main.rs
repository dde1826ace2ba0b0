use clap::{Parser, Subcommand};
use saltbox::cli::{
    decrypt_file, encrypt_file, show_info, DecryptOptions, EncryptOptions,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("SALTBOX_VERSION");
const BUILD: &str = env!("SALTBOX_BUILD");
const PROFILE: &str = env!("SALTBOX_PROFILE");
const GIT_HASH: &str = env!("SALTBOX_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "saltbox")]
#[command(author, about = "Password-based authenticated encryption of files", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file
    #[command(alias = "e")]
    Encrypt {
        /// Password the file is sealed under
        #[arg(long, required = true)]
        password: String,

        /// Input file to encrypt
        input: PathBuf,

        /// Output file (defaults to <INPUT>.sc)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Decrypt a file
    #[command(alias = "d")]
    Decrypt {
        /// Password the file was sealed under
        #[arg(long, required = true)]
        password: String,

        /// Input file to decrypt
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Show format information about an encrypted file
    #[command(alias = "i")]
    Info {
        /// Encrypted file to inspect
        file: PathBuf,
    },
}

fn default_output_path(input: &PathBuf) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(".sc");
    PathBuf::from(os)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("saltbox {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encrypt {
            password,
            input,
            output,
        } => {
            let options = EncryptOptions { password };
            let output_path = output.unwrap_or_else(|| default_output_path(&input));

            match encrypt_file(&input, &output_path, &options) {
                Ok(written) => {
                    println!("Encrypted {} bytes to {}", written, output_path.display());
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Decrypt {
            password,
            input,
            output,
        } => {
            let options = DecryptOptions { password };

            match decrypt_file(&input, &output, &options) {
                Ok(written) => {
                    println!("Decrypted {} bytes to {}", written, output.display());
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Info { file } => match show_info(&file) {
            Ok(info) => {
                print!("{}", info);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

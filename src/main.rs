use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use student_portal::{
    application::{self, CourseFilter, error::Error},
    config::{self, Config, LogFormat},
    embed_url_resolver::{EmbedURLResolver, youtube},
};
use tracing_subscriber::EnvFilter;

/// Manage the students and video courses of the student portal.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the embed URL for a course link.
    Resolve { link: String },
    /// Create the storage directory and empty collections.
    Init,
    AddStudent { name: String, email: String },
    DeleteStudent { id: String },
    /// List all students.
    Students,
    AddCourse {
        title: String,
        link: String,
        category: String,
    },
    DeleteCourse { id: String },
    /// List courses the way a student sees them.
    Courses {
        #[arg(long, default_value = application::ALL_CATEGORIES)]
        category: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show student and course counts.
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::new(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            init_logging(LogFormat::Text);
            tracing::error!("Reading config {}: {err}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.log_format);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(command: Command, config: Config) -> Result<(), Error> {
    let resolver = Arc::new(youtube::new(config.embed_url_template));
    let application = application::new(config.storage_path, resolver.clone());

    match command {
        Command::Resolve { link } => match resolver.resolve(Some(&link)) {
            Some(embed_url) => println!("{embed_url}"),
            None => println!("no embeddable video link found"),
        },
        Command::Init => application.init()?,
        Command::AddStudent { name, email } => {
            println!("{}", application.add_student(&name, &email)?);
        }
        Command::DeleteStudent { id } => report_deletion(&id, application.delete_student(&id)?),
        Command::Students => {
            for student in application.students()? {
                println!("{student}");
            }
        }
        Command::AddCourse {
            title,
            link,
            category,
        } => {
            println!("{}", application.add_course(&title, &link, &category)?);
        }
        Command::DeleteCourse { id } => report_deletion(&id, application.delete_course(&id)?),
        Command::Courses { category, search } => {
            let cards = application.course_cards(&CourseFilter::new(Some(category), search))?;
            if cards.is_empty() {
                println!("No courses found.");
            }
            for card in cards {
                println!("{card}");
            }
        }
        Command::Stats => {
            let stats = application.stats()?;
            println!("students: {}", stats.students);
            println!("courses: {}", stats.courses);
        }
    }

    Ok(())
}

fn report_deletion(id: &str, deleted: bool) {
    if deleted {
        println!("deleted {id}");
    } else {
        println!("nothing to delete for {id}");
    }
}

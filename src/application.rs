mod course;
pub mod error;
mod student;

use crate::embed_url_resolver::EmbedURLResolver;
pub use course::{ALL_CATEGORIES, Course, CourseCard, CourseFilter};
use error::Error;
use serde::{Serialize, de::DeserializeOwned};
pub use student::Student;
use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tempfile::NamedTempFile;

const STUDENTS_FILE: &str = "students.json";
const COURSES_FILE: &str = "courses.json";

pub fn new(
    storage_path: PathBuf,
    embed_url_resolver: Arc<dyn EmbedURLResolver + Send + Sync>,
) -> Application {
    Application {
        storage_path,
        embed_url_resolver,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub students: usize,
    pub courses: usize,
}

/// Students and courses of the portal, kept as JSON documents in a
/// storage directory.
pub struct Application {
    storage_path: PathBuf,
    embed_url_resolver: Arc<dyn EmbedURLResolver + Send + Sync>,
}

impl Application {
    /// Creates the storage directory and empty collections that do not
    /// exist yet. Existing documents are left alone.
    pub fn init(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.storage_path)?;

        for file_name in [STUDENTS_FILE, COURSES_FILE] {
            let path = self.build_storage_path(file_name);
            if !path.exists() {
                fs::write(&path, "[]\n")?;
                tracing::info!(path = %path.display(), "created empty collection");
            }
        }

        Ok(())
    }

    pub fn add_student(&self, name: &str, email: &str) -> Result<Student, Error> {
        let path = self.build_storage_path(STUDENTS_FILE);
        let mut students: Vec<Student> = self.read_db_from_file(&path)?;

        if students.iter().any(|student| student.email() == email) {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        let student = Student::new(generate_id("std"), name, email);
        students.push(student.clone());
        self.write_db_to_file(&path, &students)?;

        tracing::info!(student_id = %student.id(), "added student");

        Ok(student)
    }

    /// Returns whether a student with this id existed.
    pub fn delete_student(&self, id: &str) -> Result<bool, Error> {
        let path = self.build_storage_path(STUDENTS_FILE);
        let mut students: Vec<Student> = self.read_db_from_file(&path)?;

        let count = students.len();
        students.retain(|student| student.id() != id);
        if students.len() == count {
            tracing::warn!(student_id = %id, "no such student");
            return Ok(false);
        }

        self.write_db_to_file(&path, &students)?;
        tracing::info!(student_id = %id, "deleted student");

        Ok(true)
    }

    pub fn students(&self) -> Result<Vec<Student>, Error> {
        self.read_db_from_file(&self.build_storage_path(STUDENTS_FILE))
    }

    /// The link is stored as entered and only resolved when cards are built.
    pub fn add_course(&self, title: &str, link: &str, category: &str) -> Result<Course, Error> {
        let path = self.build_storage_path(COURSES_FILE);
        let mut courses: Vec<Course> = self.read_db_from_file(&path)?;

        let course = Course::new(generate_id("crs"), title, link, category);
        courses.push(course.clone());
        self.write_db_to_file(&path, &courses)?;

        tracing::info!(course_id = %course.id(), category = %category, "added course");

        Ok(course)
    }

    /// Returns whether a course with this id existed.
    pub fn delete_course(&self, id: &str) -> Result<bool, Error> {
        let path = self.build_storage_path(COURSES_FILE);
        let mut courses: Vec<Course> = self.read_db_from_file(&path)?;

        let count = courses.len();
        courses.retain(|course| course.id() != id);
        if courses.len() == count {
            tracing::warn!(course_id = %id, "no such course");
            return Ok(false);
        }

        self.write_db_to_file(&path, &courses)?;
        tracing::info!(course_id = %id, "deleted course");

        Ok(true)
    }

    pub fn courses(&self) -> Result<Vec<Course>, Error> {
        self.read_db_from_file(&self.build_storage_path(COURSES_FILE))
    }

    pub fn find_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error> {
        Ok(self
            .courses()?
            .into_iter()
            .filter(|course| filter.matches(course))
            .collect())
    }

    pub fn course_cards(&self, filter: &CourseFilter) -> Result<Vec<CourseCard>, Error> {
        Ok(self
            .find_courses(filter)?
            .into_iter()
            .map(|course| {
                let embed_url = self.embed_url_resolver.resolve(Some(course.link()));
                if embed_url.is_none() {
                    tracing::debug!(course_id = %course.id(), "course link is not embeddable");
                }
                CourseCard::new(course, embed_url)
            })
            .collect())
    }

    pub fn stats(&self) -> Result<Stats, Error> {
        Ok(Stats {
            students: self.students()?.len(),
            courses: self.courses()?.len(),
        })
    }

    fn build_storage_path(&self, file_name: &str) -> PathBuf {
        self.storage_path.join(file_name)
    }

    fn read_db_from_file<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, Error> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => return Ok(Vec::new()),
                _ => return Err(err.into()),
            },
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes into a temp file next to `path` and renames it over the old
    /// document, so readers never see a half-written file.
    fn write_db_to_file<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), Error> {
        fs::create_dir_all(&self.storage_path)?;

        let mut file = NamedTempFile::new_in(&self.storage_path)?;
        serde_json::to_writer_pretty(&mut file, records)?;
        writeln!(file)?;
        file.persist(path).map_err(|err| err.error)?;

        Ok(())
    }
}

/// `<prefix>_<unix millis><6 random digits>`
fn generate_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix: u32 = rand::random_range(0..1_000_000);

    format!("{prefix}_{millis}{suffix:06}")
}

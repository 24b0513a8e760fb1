mod cleaner;
mod corpus;
mod source;

pub use cleaner::{CleanStats, Classified, CleanedText, Rejection, TextCleaner};
pub use corpus::{
    classify_files, clean_file, clean_files, collect_text_files, ClassifiedFile, CleanedFile,
};
pub use source::{is_numeric_line, split_candidates, Candidate};

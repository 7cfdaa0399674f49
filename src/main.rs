use std::{env, process::ExitCode};

use regex_nfa::{matching::Matcher, regex::Regex, utils::RegexFlags};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| String::from("a(b|c)*d"));
    let mut texts: Vec<String> = args.collect();
    if texts.is_empty() {
        texts.push(String::from("abccccccd"));
    }

    let regex = match Regex::new_with_flags(&pattern, RegexFlags::OPTIMIZE | RegexFlags::DEBUG) {
        Ok(regex) => regex,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    for text in texts {
        println!("{:?} {}", text, regex.is_match(&text));
    }
    ExitCode::SUCCESS
}

//! Interactive menu for the paper catalog

use std::io::{self, BufRead, Write};

use paperdex_core::{Mailer, NewPaper, PaperRegistry, PaperdexError, ServiceConfig};

fn main() {
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env();
    let registry = match PaperRegistry::open(&config.db_path, &config.pdf_dir) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to open catalog: {e}");
            std::process::exit(1);
        }
    };
    let mailer = config.smtp.clone().map(Mailer::new);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!(" QUESTION PAPER CATALOG ");
        println!();
        println!("1. Add Question Paper");
        println!("2. Search Question Paper");
        println!("3. View All Question Papers");
        println!("4. Delete Question Paper");
        println!("5. Send Question Paper via Email");
        println!("6. Exit");

        let Some(choice) = prompt(&mut lines, "Enter your choice: ") else {
            break;
        };

        let result = match choice.trim() {
            "1" => add_paper(&registry, &mut lines),
            "2" => search_papers(&registry, &mut lines),
            "3" => view_all(&registry),
            "4" => delete_paper(&registry, &mut lines),
            "5" => send_email(&registry, mailer.as_ref(), &mut lines),
            "6" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice! Try again.");
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Error: {e}");
        }
    }
}

type Lines<'a> = std::io::Lines<io::StdinLock<'a>>;

fn prompt(lines: &mut Lines, message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();
    lines.next()?.ok()
}

fn prompt_i32(lines: &mut Lines, message: &str) -> Option<i32> {
    loop {
        let input = prompt(lines, message)?;
        match input.trim().parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn add_paper(registry: &PaperRegistry, lines: &mut Lines) -> Result<(), PaperdexError> {
    let Some(subject) = prompt(lines, "Enter Subject: ") else {
        return Ok(());
    };
    let Some(year) = prompt_i32(lines, "Enter Year: ") else {
        return Ok(());
    };
    let Some(semester) = prompt_i32(lines, "Enter Semester: ") else {
        return Ok(());
    };
    let Some(file_path) = prompt(lines, "Enter File Name (e.g. dbms2025.pdf): ") else {
        return Ok(());
    };
    let Some(status) = prompt(lines, "Enter Status (AVAILABLE/NOT AVAILABLE): ") else {
        return Ok(());
    };

    let id = registry.add(NewPaper {
        subject: subject.trim().to_string(),
        year,
        semester,
        file_path: file_path.trim().to_string(),
        status: status.trim().to_string(),
    })?;
    println!("Paper added successfully with id {id}.");
    Ok(())
}

fn search_papers(registry: &PaperRegistry, lines: &mut Lines) -> Result<(), PaperdexError> {
    let Some(subject) = prompt(lines, "Enter Subject: ") else {
        return Ok(());
    };
    let Some(year) = prompt_i32(lines, "Enter Year: ") else {
        return Ok(());
    };
    let Some(semester) = prompt_i32(lines, "Enter Semester: ") else {
        return Ok(());
    };

    let papers = registry.search(subject.trim(), year, semester)?;
    if papers.is_empty() {
        println!("No papers found.");
        return Ok(());
    }

    for paper in papers {
        println!("{paper}");
        match registry.resolver().resolve(&paper.file_path) {
            Some(path) => println!("  File: {}", path.display()),
            None => println!("  File not found on disk: {}", paper.file_path),
        }
    }
    Ok(())
}

fn view_all(registry: &PaperRegistry) -> Result<(), PaperdexError> {
    let papers = registry.list()?;
    if papers.is_empty() {
        println!("No papers available.");
    } else {
        for paper in papers {
            println!("{paper}");
        }
    }
    Ok(())
}

fn delete_paper(registry: &PaperRegistry, lines: &mut Lines) -> Result<(), PaperdexError> {
    let Some(id) = prompt_i32(lines, "Enter ID of paper to delete: ") else {
        return Ok(());
    };

    registry.delete(id as i64)?;
    println!("Record deleted successfully.");
    Ok(())
}

fn send_email(
    registry: &PaperRegistry,
    mailer: Option<&Mailer>,
    lines: &mut Lines,
) -> Result<(), PaperdexError> {
    let Some(mailer) = mailer else {
        println!("Email is not configured. Set SMTP_USER and SMTP_PASS environment variables.");
        return Ok(());
    };

    view_all(registry)?;

    let Some(id) = prompt_i32(lines, "\nEnter ID of paper to send: ") else {
        return Ok(());
    };
    let Some(paper) = registry.find_by_id(id as i64)? else {
        println!("Paper with ID {id} not found.");
        return Ok(());
    };

    let Some(file) = registry.resolver().resolve(&paper.file_path) else {
        println!("PDF file not found: {}", paper.file_path);
        let available = registry.resolver().available_pdfs();
        if !available.is_empty() {
            println!("Available PDF files:");
            for name in available {
                println!("  - {name}");
            }
        }
        return Ok(());
    };

    let Some(recipient) = prompt(lines, "Enter recipient email address: ") else {
        return Ok(());
    };

    println!("\nSending email...");
    match mailer.send_question_paper(recipient.trim(), &paper, &file) {
        Ok(()) => println!("Email sent successfully to {}", recipient.trim()),
        Err(e) => println!("Failed to send email: {e}"),
    }
    Ok(())
}

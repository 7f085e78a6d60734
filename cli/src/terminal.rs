//! Terminal presentation of rendered blocks, tasks, and listings.

use chrono::Local;
use colored::{ColoredString, Colorize};

use cues::{format_inline, Block, DocMeta, InlineSpan, Line, Priority, Project, Table, Task};

/// Print a rendered document to stdout.
pub fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        print_block(block);
        println!();
    }
}

fn print_block(block: &Block) {
    match block {
        Block::Heading { level, text } => match level {
            1 | 2 => {
                println!("{}", text.cyan().bold());
                println!("{}", "─".repeat(text.chars().count().max(4)).dimmed());
            }
            _ => println!("{}", text.bold()),
        },
        Block::Code(code) => {
            println!("{}", format!("┌─ {}", code.language).dimmed());
            for line in code.content.split('\n') {
                println!("{} {}", "│".dimmed(), line);
            }
            println!("{}", "└─".dimmed());
        }
        Block::Quote(quote) => {
            for line in &quote.lines {
                println!("{} {}", "┃".dimmed(), style_line(line));
            }
        }
        Block::BulletList(list) => {
            for item in &list.items {
                println!("  {} {}", "•".yellow(), style_spans(&format_inline(item)));
            }
        }
        Block::NumberedList(list) => {
            for (i, item) in list.items.iter().enumerate() {
                println!("  {}. {}", i + 1, style_spans(&format_inline(item)));
            }
        }
        Block::Table(table) => print_table(table),
        Block::Rule => println!("{}", "─".repeat(40).dimmed()),
        Block::Paragraph(line) => println!("{}", style_line(line)),
    }
}

fn style_line(line: &Line) -> String {
    style_spans(&line.spans)
}

fn style_spans(spans: &[InlineSpan]) -> String {
    spans.iter().map(style_span).collect()
}

fn style_span(span: &InlineSpan) -> String {
    match span {
        InlineSpan::Text { text } => text.clone(),
        InlineSpan::Bold { text } => text.bold().to_string(),
        InlineSpan::Italic { text } => text.italic().to_string(),
        InlineSpan::Code { text } => text.yellow().to_string(),
        InlineSpan::Link { text, href, .. } => {
            format!("{} {}", text.blue().underline(), format!("({href})").dimmed())
        }
    }
}

/// A table cell formatted for display, with its unstyled width.
struct RenderedCell {
    styled: String,
    width: usize,
}

fn rendered_cell(cell: &str) -> RenderedCell {
    let spans = format_inline(cell);
    RenderedCell {
        width: spans.iter().map(span_width).sum(),
        styled: style_spans(&spans),
    }
}

/// Unstyled display width of a span; links render as `text (href)`.
fn span_width(span: &InlineSpan) -> usize {
    match span {
        InlineSpan::Link { text, href, .. } => text.chars().count() + href.chars().count() + 3,
        other => other.plain_text().chars().count(),
    }
}

fn print_table(table: &Table) {
    let header: Vec<RenderedCell> = table.header.iter().map(|c| rendered_cell(c)).collect();
    let rows: Vec<Vec<RenderedCell>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| rendered_cell(c)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.width).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.width);
            } else {
                widths.push(cell.width);
            }
        }
    }

    print_row(&header, &widths, true);
    let total: usize = widths.iter().map(|w| w + 2).sum::<usize>() + 1;
    println!("{}", "─".repeat(total).dimmed());
    for row in &rows {
        print_row(row, &widths, false);
    }
}

fn print_row(cells: &[RenderedCell], widths: &[usize], bold: bool) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let (styled, pad) = match cells.get(i) {
            Some(cell) => (cell.styled.clone(), width.saturating_sub(cell.width)),
            None => (String::new(), *width),
        };
        let styled = if bold { styled.bold().to_string() } else { styled };
        line.push_str(&format!(" {}{} ", styled, " ".repeat(pad)));
    }
    println!("{}", line.trim_end());
}

/// Print a TODO/DONE sectioned task listing, dashboard-style.
pub fn print_task_sections(todo: &[&Task], done: &[&Task]) {
    println!("{} {}", "TODO".bold(), format!("({})", todo.len()).dimmed());
    for task in todo {
        print_task(task);
    }
    println!();
    println!("{} {}", "DONE".bold(), format!("({})", done.len()).dimmed());
    for task in done {
        print_task(task);
    }
}

/// Print one task line, with status symbol, priority badge, and due date.
pub fn print_task(task: &Task) {
    let symbol = if task.is_done {
        "[✓]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let title = if task.is_done {
        task.title.strikethrough().dimmed().to_string()
    } else {
        task.title.clone()
    };

    let mut line = format!("{} {} {}", symbol, format!("#{}", task.id).dimmed(), title);
    if let Some(priority) = task.priority {
        line.push(' ');
        line.push_str(&priority_badge(priority).to_string());
    }
    if let Some(due) = task.due {
        let local = due.with_timezone(&Local);
        line.push(' ');
        line.push_str(
            &format!("due {}", local.format("%b %e, %Y %H:%M"))
                .dimmed()
                .to_string(),
        );
    }
    println!("  {}", line);

    if let Some(desc) = task.description.as_deref() {
        if !desc.is_empty() {
            println!("      {}", desc.dimmed());
        }
    }
}

fn priority_badge(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "@High".red(),
        Priority::Medium => "@Medium".yellow(),
        Priority::Low => "@Low".green(),
    }
}

/// Print the project listing with per-project task counts; the current
/// working project is marked.
pub fn print_projects(projects: &[Project], tasks: &[Task], current: Option<i64>) {
    for project in projects {
        let count = tasks.iter().filter(|t| t.project_id == project.id).count();
        let marker = if current == Some(project.id) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {} {} {}",
            marker,
            format!("#{}", project.id).dimmed(),
            project.name.bold(),
            format!("({count})").dimmed()
        );
    }
}

/// Print the docs listing, one line per document.
pub fn print_doc_list(metas: &[DocMeta]) {
    for meta in metas {
        let mut line = format!("{} {}", meta.slug.bold(), meta.title);
        if let Some(desc) = meta.description.as_deref() {
            line.push_str(&format!("  {}", desc.dimmed()));
        }
        println!("{}", line);
    }
}

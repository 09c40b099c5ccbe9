//! Terminal output formatting.

use alpha_core::research::{AlphaIntel, IpoListing, Suggestion, TopDownOpportunity};
use alpha_core::ResearchResult;
use alpha_gateway::SourceCitation;
use colored::{ColoredString, Colorize};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

/// Print a research result: failure tag, narrative, structured extras, sources.
pub fn print_research(title: &str, result: &ResearchResult) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(term_width().min(72)));

    if let ResearchResult::Failure(failure) = result {
        println!(
            "{} {}",
            format!("[fallback: {}]", failure.kind).yellow().bold(),
            failure.message.dimmed()
        );
    }

    let output = result.output();
    println!();
    print!("{}", render_markdown(&output.text));

    if let Some(listings) = output.ipo_listings() {
        println!();
        print_ipo_table(listings);
    }
    if let Some(ideas) = output.opportunities() {
        println!();
        print_opportunities(ideas);
    }
    if let Some(intel) = output.alpha_intel() {
        println!();
        print_alpha_intel(intel);
    }

    print_sources(&output.sources);
}

/// Print grounding citations as a numbered list.
pub fn print_sources(sources: &[SourceCitation]) {
    if sources.is_empty() {
        return;
    }

    println!();
    println!("{}", "Sources".bold());
    for (i, source) in sources.iter().enumerate() {
        println!("  {}. {} {}", i + 1, source.title, source.uri.dimmed());
    }
}

/// Print IPO listings as a table sized to the terminal.
pub fn print_ipo_table(listings: &[IpoListing]) {
    if listings.is_empty() {
        println!("{}", "No live or upcoming IPOs found.".dimmed());
        return;
    }

    // Fixed columns: status 9, dates 15, price 13, gmp 8, call 6, plus separators.
    let fixed = 9 + 15 + 13 + 8 + 6 + 6;
    let company_width = term_width().saturating_sub(fixed).clamp(12, 40);

    println!(
        "{} {:<9} {:<15} {:<13} {:<8} {:<6}",
        pad_right("Company", company_width),
        "Status",
        "Dates",
        "Price Band",
        "GMP",
        "Call"
    );
    println!("{}", "─".repeat(company_width + fixed));

    for ipo in listings {
        let status = if ipo.is_live() {
            pad_right("LIVE", 9).green().bold()
        } else {
            pad_right(&ipo.status.to_uppercase(), 9).normal()
        };
        let dates = format!("{}→{}", ipo.open_date, ipo.close_date);

        println!(
            "{} {} {} {} {} {}",
            pad_right(&truncate_visual(&ipo.company, company_width), company_width),
            status,
            pad_right(&truncate_visual(&dates, 15), 15),
            pad_right(&truncate_visual(&ipo.price_band, 13), 13),
            pad_right(&truncate_visual(&ipo.gmp, 8), 8),
            suggestion_label(ipo.institutional_suggestion)
        );

        if let Some(summary) = &ipo.audit_summary {
            let width = term_width().saturating_sub(4).max(20);
            println!("    {}", truncate_visual(summary, width).dimmed());
        }
    }

    println!();
    println!("{} IPO(s) tracked", listings.len());
}

/// Print top-down opportunities as a table.
pub fn print_opportunities(ideas: &[TopDownOpportunity]) {
    if ideas.is_empty() {
        println!("{}", "No opportunities surfaced.".dimmed());
        return;
    }

    println!(
        "{:<12} {:<24} {:<18} {:<8} {:<8} {:>6}",
        "Ticker", "Company", "Sector", "Rating", "Upside", "Score"
    );
    println!("{}", "─".repeat(81));

    for idea in ideas {
        println!(
            "{} {} {} {} {} {:>6.1}",
            pad_right(&truncate_visual(&idea.ticker, 12), 12).cyan(),
            pad_right(&truncate_visual(&idea.company, 24), 24),
            pad_right(&truncate_visual(&idea.sector, 18), 18),
            pad_right(&truncate_visual(&idea.rating, 8), 8).bold(),
            pad_right(&truncate_visual(&idea.upside, 8), 8).green(),
            idea.institutional_score
        );
        let width = term_width().saturating_sub(4).max(20);
        println!("    {}", truncate_visual(&idea.rationale, width).dimmed());
    }
}

/// Print the moat / risk / SWOT block.
pub fn print_alpha_intel(intel: &AlphaIntel) {
    let heading = format!("Alpha Intel: {}", intel.entity);
    if intel.simulated {
        println!("{} {}", heading.bold(), "[SIMULATED]".yellow());
    } else {
        println!("{}", heading.bold());
    }

    println!("  Moat score:  {}", intel.moat_score.to_string().cyan());
    println!(
        "  Risk rating: {}",
        format!("{:?}", intel.risk_rating).to_uppercase()
    );

    let quadrants = [
        ("S", &intel.swot.strengths),
        ("W", &intel.swot.weaknesses),
        ("O", &intel.swot.opportunities),
        ("T", &intel.swot.threats),
    ];
    for (label, items) in quadrants {
        if !items.is_empty() {
            println!("  {}: {}", label.bold(), items.join(", "));
        }
    }
}

fn suggestion_label(suggestion: Suggestion) -> ColoredString {
    match suggestion {
        Suggestion::Apply => suggestion.as_str().green().bold(),
        Suggestion::Avoid => suggestion.as_str().red().bold(),
        Suggestion::Maybe => suggestion.as_str().yellow(),
    }
}

/// Render Markdown to styled terminal text.
///
/// Headings, emphasis, lists, rules and inline code get terminal styling;
/// links keep their text with the target appended. Anything else is passed
/// through as plain text.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut heading: Option<HeadingLevel> = None;
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut link: Option<String> = None;

    for event in Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => heading = Some(level),
            Event::End(TagEnd::Heading(_)) => {
                heading = None;
                out.push_str("\n\n");
            }
            Event::Start(Tag::Strong) => bold += 1,
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = lists.len().saturating_sub(1);
                out.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Event::End(TagEnd::Paragraph) => {
                out.push('\n');
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => link = Some(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = link.take() {
                    out.push_str(&format!(" ({})", url).dimmed().to_string());
                }
            }
            Event::End(TagEnd::TableCell) => out.push_str(" │ "),
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => out.push('\n'),
            Event::End(TagEnd::Table) => out.push('\n'),
            Event::Rule => {
                out.push_str(&"─".repeat(term_width().min(72)).dimmed().to_string());
                out.push_str("\n\n");
            }
            Event::Code(code) => out.push_str(&code.yellow().to_string()),
            Event::Text(text) => {
                let styled = match heading {
                    Some(HeadingLevel::H1) => text.to_uppercase().cyan().bold(),
                    Some(_) => text.cyan().bold(),
                    None if bold > 0 => text.bold(),
                    None if italic > 0 => text.italic(),
                    None => text.normal(),
                };
                out.push_str(&styled.to_string());
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

use super::{ArchiveReport, ClassReport, MemberReport};
use colored::Colorize;

/// How many referencing classes a member line names before the listing is
/// truncated to a count-and-ellipsis marker
const MAX_REFERENCERS_SHOWN: usize = 3;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// Show the full member listing per class, not just the counts
    show_members: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_members: true }
    }

    #[allow(dead_code)] // Builder pattern method for future use
    pub fn with_members(mut self, show: bool) -> Self {
        self.show_members = show;
        self
    }

    pub fn report(&self, report: &ArchiveReport) {
        println!(
            "{}",
            format!("Inspecting classes in {}:", report.archive_path.display())
                .cyan()
                .bold()
        );
        println!();

        if report.classes.is_empty() {
            println!("{}", "No classes to analyze.".yellow());
            return;
        }

        for class in &report.classes {
            self.print_class(class);
        }

        self.print_summary(report);
    }

    fn print_class(&self, class: &ClassReport) {
        match &class.super_name {
            Some(super_name) => println!(
                "{} {}",
                class.name.bold(),
                format!("(extends {})", super_name).dimmed()
            ),
            None => println!("{}", class.name.bold()),
        }

        if self.show_members {
            if !class.methods.is_empty() {
                println!("  {}", "Methods:".dimmed());
                for member in &class.methods {
                    self.print_member(member);
                }
            }
            if !class.fields.is_empty() {
                println!("  {}", "Fields:".dimmed());
                for member in &class.fields {
                    self.print_member(member);
                }
            }
        }

        println!(
            "  {}",
            format!(
                "{} methods ({} referenced, {} dead), {} fields ({} referenced, {} dead)",
                class.methods.len(),
                class.referenced_methods(),
                class.dead_methods(),
                class.fields.len(),
                class.referenced_fields(),
                class.dead_fields()
            )
            .dimmed()
        );
        println!();
    }

    fn print_member(&self, member: &MemberReport) {
        if member.is_referenced() {
            println!(
                "    {} {} {}  {}",
                "●".green(),
                member.sig.name,
                member.sig.descriptor.dimmed(),
                format!("used by: {}", format_referencers(&member.referenced_by)).dimmed()
            );
        } else {
            println!(
                "    {} {} {}  {}",
                "○".red(),
                member.sig.name,
                member.sig.descriptor.dimmed(),
                "never used".red()
            );
        }
    }

    fn print_summary(&self, report: &ArchiveReport) {
        let totals = &report.totals;

        println!("{}", "─".repeat(60).dimmed());
        println!("Summary: {} classes analyzed", totals.classes);
        println!(
            "  Methods: {} total, {}, {}",
            totals.methods,
            format!("{} referenced", totals.referenced_methods).green(),
            colorize_dead(totals.dead_methods())
        );
        println!(
            "  Fields: {} total, {}, {}",
            totals.fields,
            format!("{} referenced", totals.referenced_fields).green(),
            colorize_dead(totals.dead_fields())
        );
        println!();
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn colorize_dead(count: usize) -> colored::ColoredString {
    let text = format!("{count} dead");
    if count > 0 {
        text.red()
    } else {
        text.green()
    }
}

/// Render a referencing-class list, truncating past
/// [`MAX_REFERENCERS_SHOWN`] entries
fn format_referencers(referencers: &[String]) -> String {
    if referencers.len() <= MAX_REFERENCERS_SHOWN {
        referencers.join(", ")
    } else {
        format!(
            "{} classes including {}, ...",
            referencers.len(),
            referencers[..MAX_REFERENCERS_SHOWN].join(", ")
        )
    }
}

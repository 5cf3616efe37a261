use colored::Colorize;

use crate::features::breathing::{
    circle_scale, render_progress_bar, PatternCatalog, Phase, SessionSnapshot,
};
use crate::features::courses::{CourseProgress, Enrollment};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Format the pattern catalog as a numbered list
pub fn format_patterns_pretty(catalog: &PatternCatalog) -> String {
    let mut output = format!("Breathing patterns ({})\n", catalog.len());
    output.push_str(&rule());
    output.push('\n');

    for (i, pattern) in catalog.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {:<22} {}\n",
            i + 1,
            pattern.name().bold(),
            pattern.format_durations().cyan()
        ));
        if !pattern.description().is_empty() {
            output.push_str(&format!("    {}\n", pattern.description().dimmed()));
        }
    }

    output
}

fn phase_color(phase: Phase, text: &str) -> String {
    match phase {
        Phase::Inhale => text.blue().bold().to_string(),
        Phase::Hold => text.yellow().bold().to_string(),
        Phase::Exhale => text.green().bold().to_string(),
        Phase::Pause => text.magenta().bold().to_string(),
    }
}

/// Format the line printed when a phase begins, with a bar sized like the
/// breathing circle
pub fn format_phase_pretty(snapshot: &SessionSnapshot) -> String {
    let scale = circle_scale(snapshot.phase, snapshot.progress);
    format!(
        "{} {} {:<12} {}s",
        format!("[cycle {}]", snapshot.cycle_count + 1).dimmed(),
        phase_color(snapshot.phase, &render_progress_bar(scale, 20)),
        phase_color(snapshot.phase, snapshot.label),
        snapshot.remaining_seconds
    )
}

/// Format courses with the user's progress
pub fn format_courses_pretty(courses: &[CourseProgress]) -> String {
    if courses.is_empty() {
        return "Courses (0 items)\n  No courses".to_string();
    }

    let mut output = format!("Courses ({} items)\n", courses.len());
    output.push_str(&rule());
    output.push('\n');

    for entry in courses {
        let status = match &entry.enrollment {
            Some(e) if e.is_completed => "[x]".green(),
            Some(_) => "[~]".yellow(),
            None => "[ ]".white(),
        };

        let mut line = format!(
            "{} {} {}",
            status,
            format!("#{}", entry.course.id).dimmed(),
            entry.course.title.bold()
        );
        if entry.enrollment.is_some() {
            line.push_str(&format!("  {}", format!("{}%", entry.progress).cyan()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format one course with its modules
pub fn format_course_pretty(entry: &CourseProgress) -> String {
    let course = &entry.course;
    let mut output = format!("{}\n", course.title.bold());
    output.push_str(&format!("  {}\n", course.description.dimmed()));

    match &entry.enrollment {
        Some(e) => output.push_str(&format!(
            "  {}: {} ({}%)\n",
            "Started".dimmed(),
            e.started_at_local().format("%Y-%m-%d %H:%M"),
            entry.progress
        )),
        None => output.push_str(&format!("  {}\n", "Not started".dimmed())),
    }

    output.push('\n');
    for (i, module) in course.modules.iter().enumerate() {
        let mark = if entry.is_module_completed(module) {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        output.push_str(&format!("  {} {}. {}\n", mark, i + 1, module));
    }

    output
}

/// Format the result of completing a module
pub fn format_module_completed_pretty(title: &str, module: &str, enrollment: &Enrollment) -> String {
    let mut output = format!("{} Completed: {}\n", "✓".green(), module.bold());
    if enrollment.is_completed {
        output.push_str(&format!(
            "{} You finished {}. Well done!",
            "★".yellow(),
            title.bold()
        ));
    } else {
        output.push_str(&format!(
            "  {} modules completed in {}",
            enrollment.completed_modules.len(),
            title
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::courses::Course;
    use chrono::Utc;

    fn course() -> Course {
        Course {
            id: 3,
            title: "Panic Disorder Course".to_string(),
            description: "Managing panic attacks and anxiety".to_string(),
            modules: vec!["One".to_string(), "Two".to_string()],
        }
    }

    fn enrollment(completed: &[&str], is_completed: bool) -> Enrollment {
        Enrollment {
            id: 1,
            user_id: "alex".to_string(),
            course_id: 3,
            started_at: Utc::now(),
            completed_modules: completed.iter().map(ToString::to_string).collect(),
            is_completed,
        }
    }

    #[test]
    fn test_format_patterns_pretty() {
        let output = format_patterns_pretty(&PatternCatalog::builtin());
        assert!(output.contains("Breathing patterns (4)"));
        assert!(output.contains("Triangle Breathing"));
        assert!(output.contains("4-0-4-4"));
    }

    #[test]
    fn test_format_phase_pretty() {
        let snapshot = SessionSnapshot {
            pattern: "Box Breathing".to_string(),
            phase: Phase::Hold,
            label: Phase::Hold.label(),
            remaining_seconds: 4,
            cycle_count: 0,
            running: true,
            progress: 0.0,
        };
        let line = format_phase_pretty(&snapshot);
        assert!(line.contains("cycle 1"));
        assert!(line.contains("Hold"));
        assert!(line.contains(&"█".repeat(20)));
        assert!(line.contains("4s"));
    }

    #[test]
    fn test_format_courses_pretty_empty() {
        assert!(format_courses_pretty(&[]).contains("No courses"));
    }

    #[test]
    fn test_format_courses_pretty_shows_progress() {
        let entries = vec![CourseProgress::new(course(), Some(enrollment(&["One"], false)))];
        let output = format_courses_pretty(&entries);
        assert!(output.contains("Panic Disorder Course"));
        assert!(output.contains("50%"));
    }

    #[test]
    fn test_format_course_pretty_lists_modules() {
        let entry = CourseProgress::new(course(), None);
        let output = format_course_pretty(&entry);
        assert!(output.contains("Not started"));
        assert!(output.contains("1. One"));
        assert!(output.contains("2. Two"));
    }

    #[test]
    fn test_format_module_completed_pretty() {
        let partial = format_module_completed_pretty("Panic", "One", &enrollment(&["One"], false));
        assert!(partial.contains("1 modules completed"));

        let done =
            format_module_completed_pretty("Panic", "Two", &enrollment(&["One", "Two"], true));
        assert!(done.contains("Well done"));
    }
}

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracequiz::model::option_label;
use tracequiz::quiz::{QuizView, ResultView, StepView};
use tracequiz::trace_table::{Piece, RenderModel};
use tracequiz::view::{CodeLine, ErrorPanel, Feedback, Mark, OptionView};

pub fn print_mode_menu(modes: &[String]) {
    println!("\n=== MODE SELECTION ===");
    for m in modes {
        println!("  {}", m);
    }
    println!("Type a mode name, or 'quit'.");
}

pub fn print_error_panel(panel: &ErrorPanel) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![Cell::new(&panel.title)
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)]);
    table.add_row(vec![Cell::new(&panel.message)]);
    println!("\n{}", table);
    println!("[{}]", panel.action.label());
}

pub fn print_view(view: &QuizView) {
    match view {
        QuizView::Result { number, view } => print_result(*number, view),
        QuizView::StepTrace { number, view } => print_step(*number, view),
        QuizView::TraceTable { number, view } => print_trace_table(*number, view),
        QuizView::Complete { answered, action } => {
            println!("\n🎉 All done! {} questions completed. Good work.", answered);
            println!("[{}]", action.label());
        }
    }
}

fn print_code(code: &[CodeLine]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for line in code {
        let marker = if line.highlighted { "▶" } else { "" };
        let mut text = Cell::new(&line.text);
        if line.highlighted {
            text = text.fg(Color::Yellow).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(line.number).set_alignment(CellAlignment::Right),
            text,
        ]);
    }
    println!("{}", table);
}

fn print_options(options: &[OptionView]) {
    for opt in options {
        let mark = match opt.mark {
            Some(Mark::Correct) => "  ✔",
            Some(Mark::Incorrect) => "  ✘",
            None => "",
        };
        println!("  {}. {}{}", opt.label, opt.text, mark);
    }
}

fn print_feedback(feedback: &Feedback) {
    println!("\n{}", feedback.headline());
    if !feedback.explanation.is_empty() {
        println!("{}", feedback.explanation);
    }
    println!("[next] {}", feedback.action.label());
}

fn print_result(number: usize, view: &ResultView) {
    println!("\nQ{}. {}  <{}>", number, view.title, view.badge);
    print_code(&view.code);
    println!("{}", view.prompt);
    print_options(&view.options);
    match &view.feedback {
        Some(fb) => print_feedback(fb),
        None => println!("Answer with a letter (a-{}).", last_label(view.options.len())),
    }
}

fn print_step(number: usize, view: &StepView) {
    println!(
        "\nQ{}. {} (Step {}/{})  <{}>",
        number,
        view.title,
        view.step_index + 1,
        view.step_count,
        view.badge
    );
    print_code(&view.code);
    println!("{}", view.prompt);
    print_options(&view.options);
    match &view.feedback {
        Some(fb) => print_feedback(fb),
        None => println!("Answer with a letter (a-{}).", last_label(view.options.len())),
    }
}

fn last_label(count: usize) -> char {
    option_label(count.saturating_sub(1))
}

pub fn print_trace_table(number: usize, model: &RenderModel) {
    if model.is_question_complete() {
        println!("\nQ{}. {} (complete)", number, model.title);
    } else {
        println!(
            "\nQ{}. {} (Row {}/{})",
            number,
            model.title,
            model.row_index + 1,
            model.row_count
        );
    }
    print_code(&model.code);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Line").add_attribute(Attribute::Bold),
    ];
    header.extend(
        model
            .variables
            .iter()
            .map(|v| Cell::new(v).add_attribute(Attribute::Bold)),
    );
    table.add_row(header);

    for (i, row) in model.history.iter().enumerate() {
        let mut cells = vec![Cell::new(i + 1), Cell::new(row.line)];
        cells.extend(row.values.iter().map(|(_, value)| Cell::new(value)));
        table.add_row(cells);
    }

    if !model.slots.is_empty() {
        let line = model
            .code
            .iter()
            .find(|l| l.highlighted)
            .map(|l| l.number)
            .unwrap_or_default();
        let mut cells = vec![
            Cell::new(format!("{}▶", model.row_index + 1)).fg(Color::Cyan),
            Cell::new(line),
        ];
        for slot in &model.slots {
            let cell = match (slot.correct, &slot.hint) {
                (Some(true), _) => {
                    Cell::new(format!("{} ✔", slot.display_value())).fg(Color::Green)
                }
                (Some(false), Some(hint)) => {
                    Cell::new(format!("{} ✘ ({})", slot.display_value(), hint)).fg(Color::Red)
                }
                (Some(false), None) => {
                    Cell::new(format!("{} ✘", slot.display_value())).fg(Color::Red)
                }
                (None, _) => Cell::new(format!("[{}]", slot.display_value())),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    for i in 2..(2 + model.variables.len()) {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Center);
        }
    }
    println!("{}", table);

    if let Some(fb) = &model.feedback {
        print_feedback(fb);
        return;
    }
    if model.is_question_complete() {
        return;
    }

    println!("Pieces: {}", piece_list(&model.available));
    if model.confirm_enabled {
        println!("All slots filled. 'confirm' to check this row.");
    } else {
        println!("Use 'place <variable> <piece#>' or 'remove <variable>'.");
    }
}

fn piece_list(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "(none left)".to_string();
    }
    pieces
        .iter()
        .enumerate()
        .map(|(i, p)| format!("[{}] {}", i + 1, p.value()))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn print_bank_summary(rows: &[(String, String, usize, usize, Result<(), String>)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Mode").add_attribute(Attribute::Bold),
        Cell::new("Source"),
        Cell::new("Questions"),
        Cell::new("Rows/Steps"),
        Cell::new("Status"),
    ]);

    for i in 2..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (mode, source, questions, units, status) in rows {
        let status_cell = match status {
            Ok(()) => Cell::new("OK").fg(Color::Green),
            Err(msg) => Cell::new(msg).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(mode).add_attribute(Attribute::Bold),
            Cell::new(source),
            Cell::new(questions),
            Cell::new(units),
            status_cell,
        ]);
    }
    println!("\n{}", table);
}

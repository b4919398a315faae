use crate::{
    calendar::WEEKDAYS,
    field::Adornment,
    vdom::{Element, Node},
};

use super::{DateCell, DatePicker};

fn week_bar() -> Element {
    Element::new("thead").child(
        Element::new("tr").children(
            WEEKDAYS
                .iter()
                .map(|day| Element::new("th").child(Node::text(*day))),
        ),
    )
}

fn date_cell(cell: &DateCell) -> Element {
    if cell.hidden {
        return Element::new("td");
    }
    let mut td = Element::new("td").attr("data-date", cell.date.to_string());
    if cell.today {
        td = td.class("today");
    }
    if cell.selected {
        td = td.class("selected");
    }
    if cell.offset {
        td = td.class("offSet");
    }
    if cell.disabled {
        td = td.attr("state", "disabled");
    }
    td.child(Node::text(cell.date.format("%-d").to_string()))
}

impl DatePicker {
    /// Resyncs with the model, then builds the view.
    pub fn render(&mut self) -> Node {
        self.before_update();
        self.view()
    }

    pub fn view(&self) -> Node {
        let value = self.value();
        let mut root = Element::new("div")
            .class("date-picker")
            .child(self.field().view(&value));
        if self.is_open() {
            root = root.child(self.calendar_view());
        }
        root.into()
    }

    fn calendar_view(&self) -> Element {
        let header = Element::new("div")
            .class("ui")
            .class("grid")
            .child(
                Element::new("div")
                    .class("three wide column")
                    .child(Adornment::icon("chevron left").view())
                    .class("prev-month"),
            )
            .child(
                Element::new("div")
                    .class("ten wide column")
                    .child(
                        Element::new("div")
                            .class("mth-year")
                            .child(Node::text(self.title())),
                    ),
            )
            .child(
                Element::new("div")
                    .class("three wide column")
                    .child(Adornment::icon("chevron right").view())
                    .class("next-month"),
            );

        let body = Element::new("tbody").children(self.weeks().iter().map(|week| {
            Element::new("tr").children(week.iter().map(date_cell))
        }));

        Element::new("div")
            .class("ui")
            .class("popup")
            .class("bottom left")
            .child(header)
            .child(
                Element::new("table")
                    .class("ui")
                    .class("very basic")
                    .class("small")
                    .class("table")
                    .child(week_bar())
                    .child(body),
            )
    }
}

//! The egui view over [`TodoState`].

use crate::api::GlooTodoApi;
use std::cell::RefCell;
use std::rc::Rc;
use todos_client::{TodoApi, TodoState};
use todos_shared::TaskId;
use wasm_bindgen_futures::spawn_local;

type SharedState = Rc<RefCell<TodoState<GlooTodoApi>>>;

enum Action {
    Submit,
    Toggle(TaskId),
    Delete(TaskId),
}

pub struct TodoApp {
    state: SharedState,
}

impl TodoApp {
    pub fn new(api: GlooTodoApi, ctx: &egui::Context) -> Self {
        let app = Self {
            state: Rc::new(RefCell::new(TodoState::new(api))),
        };
        app.load(ctx);
        app
    }

    // Requests run on the browser's event loop. The state is only borrowed
    // to start a request and to apply its result, never across the await.

    fn load(&self, ctx: &egui::Context) {
        let api = self.state.borrow().api().clone();
        let state = Rc::clone(&self.state);
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = api.list().await;
            state.borrow_mut().apply_loaded(result);
            ctx.request_repaint();
        });
    }

    fn submit(&self, ctx: &egui::Context) {
        let (api, title) = {
            let state = self.state.borrow();
            match state.pending_submit() {
                Some(title) => (state.api().clone(), title),
                None => return,
            }
        };
        let state = Rc::clone(&self.state);
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = api.create(&title).await;
            state.borrow_mut().apply_created(result);
            ctx.request_repaint();
        });
    }

    fn delete(&self, id: TaskId, ctx: &egui::Context) {
        let api = self.state.borrow().api().clone();
        let state = Rc::clone(&self.state);
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = api.delete(&id).await;
            state.borrow_mut().apply_removed(&id, result);
            ctx.request_repaint();
        });
    }

    fn draw(&self, ui: &mut egui::Ui) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut state = self.state.borrow_mut();

        ui.heading("Todo List");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let mut title = state.pending_title().to_owned();
            let input = ui.add(
                egui::TextEdit::singleline(&mut title).hint_text("Add a new task"),
            );
            if input.changed() {
                state.set_pending_title(title);
            }
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add Task").clicked() || entered {
                actions.push(Action::Submit);
            }
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in state.items() {
                ui.horizontal(|ui| {
                    let mut completed = item.completed;
                    if ui.checkbox(&mut completed, "").changed() {
                        actions.push(Action::Toggle(item.task.id));
                    }

                    let mut title = egui::RichText::new(&item.task.title);
                    if item.completed {
                        title = title.strikethrough().weak();
                    }
                    ui.label(title);

                    if ui.button("Delete").clicked() {
                        actions.push(Action::Delete(item.task.id));
                    }
                });
            }
        });

        actions
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| self.draw(ui))
            .inner;

        for action in actions {
            match action {
                Action::Submit => self.submit(ctx),
                Action::Toggle(id) => {
                    self.state.borrow_mut().toggle(&id);
                }
                Action::Delete(id) => self.delete(id, ctx),
            }
        }
    }
}

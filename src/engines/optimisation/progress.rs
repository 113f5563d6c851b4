use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize);
}

/// Silent callback
impl ProgressCallback for () {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _evaluations: usize) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize) {
        (**self).on_generation_complete(generation, best_fitness, evaluations);
    }
}

pub struct LogProgressCallback {
    method: String,
}

impl LogProgressCallback {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into() }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("[{}] generation {} starting", self.method, generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize) {
        log::info!(
            "[{}] generation {} complete. Best fitness: {:.6}, evaluations: {}",
            self.method,
            generation + 1,
            best_fitness,
            evaluations
        );
    }
}

// For hosts that run the search on a worker thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete { generation: usize, best_fitness: f64, evaluations: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, evaluations: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            evaluations,
        });
    }
}

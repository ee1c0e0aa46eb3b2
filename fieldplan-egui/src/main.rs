fn main() -> anyhow::Result<()> {
    fieldplan_egui::run()
}

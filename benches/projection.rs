use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use aacascade::{
    node_visuals, project, CascadeMachine, CascadeSession, DrugEffectTable, DrugId,
    ExplanationCatalog, ReadoutKey, RecordingRenderer, SessionConfig,
};

fn bench_project(c: &mut Criterion) {
    let table = DrugEffectTable::builtin();
    let catalog = ExplanationCatalog::builtin();
    let mut machine = CascadeMachine::new(table.clone());
    machine.trigger();
    machine.apply_drug(DrugId::Nsaid).unwrap();
    let state = machine.state().clone();

    let mut group = c.benchmark_group("projection");
    group.throughput(Throughput::Elements(ReadoutKey::ALL.len() as u64));
    group.bench_function("project_nsaid", |b| {
        b.iter(|| project(black_box(&state), &table, &catalog));
    });
    group.bench_function("node_visuals_nsaid", |b| {
        b.iter(|| node_visuals(black_box(&state)));
    });
    group.finish();
}

fn bench_drug_cycle(c: &mut Criterion) {
    c.bench_function("session/apply_every_drug", |b| {
        let mut session =
            CascadeSession::builtin(SessionConfig::default(), RecordingRenderer::new()).unwrap();
        session.on_trigger();
        b.iter(|| {
            for drug in DrugId::ALL {
                session.on_apply_drug(drug, 0).unwrap();
            }
            // Keep the recorder from growing across iterations.
            session.renderer_mut().take();
        });
    });
}

criterion_group!(benches, bench_project, bench_drug_cycle);
criterion_main!(benches);

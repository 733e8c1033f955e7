/*!
 * Scheduling Policy Benchmarks
 *
 * Selection and admit/remove cost of the mq and adv policies
 */

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use prio_sched::scheduler::{
    LotteryScheduler, MultipleQueueScheduler, PriorityClass, RngTickets, SchedulingAlgorithm,
};
use prio_sched::{EntityId, LocalIrq, Priority, SchedulingEntity};
use std::hint::black_box;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Task {
    id: EntityId,
    priority: Priority,
}

impl SchedulingEntity for Task {
    fn id(&self) -> EntityId {
        self.id
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

fn populate(policy: &dyn SchedulingAlgorithm<Task>, per_class: u32) {
    for class in PriorityClass::PRECEDENCE {
        for n in 0..per_class {
            policy.add_to_runqueue(Task {
                id: class.as_raw() as EntityId * 10_000 + n,
                priority: class.as_raw(),
            });
        }
    }
}

fn policies() -> Vec<(&'static str, Box<dyn SchedulingAlgorithm<Task>>)> {
    let round_robin: Box<dyn SchedulingAlgorithm<Task>> =
        Box::new(MultipleQueueScheduler::new(Arc::new(LocalIrq::new())));
    let lottery: Box<dyn SchedulingAlgorithm<Task>> = Box::new(LotteryScheduler::new(
        Arc::new(LocalIrq::new()),
        RngTickets::seeded(1),
    ));
    vec![("mq", round_robin), ("adv", lottery)]
}

fn bench_pick_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_next_entity");

    for per_class in [1u32, 16, 256] {
        for (name, policy) in policies() {
            populate(policy.as_ref(), per_class);

            group.bench_with_input(BenchmarkId::new(name, per_class), &per_class, |b, _| {
                b.iter(|| black_box(policy.pick_next_entity()));
            });
        }
    }

    group.finish();
}

fn bench_admit_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("admit_remove");

    for per_class in [16u32, 256] {
        for (name, policy) in policies() {
            populate(policy.as_ref(), per_class);
            let extra = Task {
                id: 99_999,
                priority: PriorityClass::Normal.as_raw(),
            };

            group.bench_with_input(BenchmarkId::new(name, per_class), &extra, |b, extra| {
                b.iter(|| {
                    policy.add_to_runqueue(black_box(*extra));
                    policy.remove_from_runqueue(black_box(extra));
                });
            });
        }
    }

    group.finish();
}

fn bench_empty_pick(c: &mut Criterion) {
    let policy = MultipleQueueScheduler::<Task>::new(Arc::new(LocalIrq::new()));

    c.bench_function("pick_next_entity_idle", |b| {
        b.iter(|| black_box(policy.pick_next_entity()));
    });
}

criterion_group!(benches, bench_pick_next, bench_admit_remove, bench_empty_pick);
criterion_main!(benches);

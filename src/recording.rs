use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::components::{LocalTransform, Velocity};
use crate::context::SimContext;
use crate::driver::FrameObserver;

const CSV_HEADER: &str = "time,x,y,z,vx,vy,vz";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: f32,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Sample {
    fn csv_row(&self) -> String {
        let (p, v) = (self.position, self.velocity);
        format!(
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            self.time, p.x, p.y, p.z, v.x, v.y, v.z
        )
    }
}

/// Samples the projectile at a fixed interval while physics runs.
///
/// Every sample goes to the log at debug level; with a sink it is also
/// appended as a CSV row. A failed write drops the sink and sampling
/// continues log-only.
pub struct SampleRecorder<W: Write> {
    interval_ms: f32,
    since_last_ms: f32,
    sink: Option<W>,
    header_written: bool,
    count: usize,
}

impl SampleRecorder<BufWriter<File>> {
    pub fn to_csv(path: &Path, interval_ms: u32) -> io::Result<Self> {
        let file = File::create(path)?;
        info!(path = %path.display(), "recording samples");
        Ok(Self::new(interval_ms, Some(BufWriter::new(file))))
    }
}

impl<W: Write> SampleRecorder<W> {
    pub fn new(interval_ms: u32, sink: Option<W>) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f32,
            since_last_ms: 0.0,
            sink,
            header_written: false,
            count: 0,
        }
    }

    pub fn record(&mut self, ctx: &SimContext, delta: f32, absolute: f32) {
        if !ctx.physics_enabled {
            return;
        }
        self.since_last_ms += delta * 1000.0;
        if self.since_last_ms < self.interval_ms {
            return;
        }
        self.since_last_ms = 0.0;

        let position = ctx
            .world
            .get::<&LocalTransform>(ctx.projectile)
            .map(|t| t.position)
            .unwrap_or_default();
        let velocity = ctx
            .world
            .get::<&Velocity>(ctx.projectile)
            .map(|v| v.0)
            .unwrap_or_default();
        let sample = Sample {
            time: absolute,
            position,
            velocity,
        };
        self.count += 1;
        debug!(
            t = sample.time,
            x = position.x,
            y = position.y,
            z = position.z,
            vx = velocity.x,
            vy = velocity.y,
            vz = velocity.z,
            "sample"
        );

        if let Err(err) = self.write(&sample) {
            warn!(%err, "sample file write failed, continuing without it");
            self.sink = None;
        }
    }

    fn write(&mut self, sample: &Sample) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        if !self.header_written {
            writeln!(sink, "{CSV_HEADER}")?;
            self.header_written = true;
        }
        writeln!(sink, "{}", sample.csv_row())?;
        sink.flush()
    }
}

impl<W: Write> Drop for SampleRecorder<W> {
    fn drop(&mut self) {
        if self.count > 0 {
            info!(samples = self.count, "recording finished");
        }
    }
}

impl<W: Write> FrameObserver for SampleRecorder<W> {
    fn on_frame(&mut self, ctx: &mut SimContext, delta: f32, absolute: f32) {
        self.record(ctx, delta, absolute);
    }
}

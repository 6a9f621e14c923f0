use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use robot_state_publisher::{KinematicTree, PublisherConfig, RobotStatePublisher, TfBus, Time};

/// Load a urdf robot description and periodically publish the transforms of
/// all its links for the joint positions listed in a toml config
/// robot_state_publisher --urdf data/pan_tilt_arm.urdf --config data/publisher.toml --echo
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// urdf robot description
    #[arg(short, long)]
    urdf: PathBuf,
    /// toml file with publisher settings and joint positions
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// publish every link relative to the root link instead of its parent
    #[arg(long)]
    flatten: bool,
    /// publish rate in Hz, overrides publish_frequency from the config
    #[arg(short, long)]
    rate: Option<f64>,
    /// exit after this many publish cycles, cycles that failed to publish included
    #[arg(short = 'n', long)]
    count: Option<u64>,
    /// log every published transform
    #[arg(long)]
    echo: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PublisherConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PublisherConfig::default(),
    };
    if args.flatten {
        config.flatten_tree = true;
    }
    if let Some(rate) = args.rate {
        config.publish_frequency = rate;
    }
    let period = config
        .publish_period()
        .context("publish frequency must be a positive number")?;

    let tree = Arc::new(
        KinematicTree::from_urdf_file(&args.urdf)
            .with_context(|| format!("loading urdf {}", args.urdf.display()))?,
    );
    log::info!("robot tree:\n{tree}");
    for joint in tree.joint_names() {
        if !config.joint_positions.contains_key(joint) {
            log::warn!(
                "no position configured for joint '{joint}', links below it won't be published"
            );
        }
    }

    let bus = TfBus::new();
    if args.echo {
        let mut transforms = Box::pin(bus.subscribe(&config.tf_topic)?.into_stream());
        tokio::spawn(async move {
            while let Some(tfm) = transforms.next().await {
                for tf in &tfm.transforms {
                    let xyz = tf.transform.translation;
                    let quat = tf.transform.rotation;
                    log::info!(
                        "At time {:.3} frame {} -> {}, translation [{:.3} {:.3} {:.3}], rotation [{:.3} {:.3} {:.3} {:.3}]",
                        tf.header.stamp.to_sec_f64(),
                        tf.header.frame_id,
                        tf.child_frame_id,
                        xyz.x,
                        xyz.y,
                        xyz.z,
                        quat.i,
                        quat.j,
                        quat.k,
                        quat.w,
                    );
                }
            }
        });
    }

    let publisher = RobotStatePublisher::new(tree, &bus, &config)?;
    let frames = if config.flatten_tree {
        "relative to the root"
    } else {
        "relative to their parents"
    };
    log::info!(
        "publishing on {} at {} Hz, {frames}",
        config.tf_topic,
        config.publish_frequency
    );

    let mut update_interval = tokio::time::interval(period);
    let mut cycles = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("ctrl-c, exiting");
                break;
            },
            _ = update_interval.tick() => {
                // errors are already logged by the publisher, try again next tick
                let joints = &config.joint_positions;
                if let Ok(count) = publisher.publish_transforms(joints, Time::now()) {
                    log::debug!("published {count} transforms");
                }
                cycles += 1;
                if args.count.is_some_and(|count| cycles >= count) {
                    break;
                }
            },
        }
    }

    // let the echo task print the last batch
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    Ok(())
}

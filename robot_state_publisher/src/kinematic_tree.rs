use std::{
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    fmt,
    path::Path,
};

use crate::{joint::Joint, tf_error::TfError};

/// A link together with the joint that attaches it to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub link: String,
    /// `None` for the root segment.
    pub parent: Option<String>,
    /// `None` for the root segment.
    pub joint: Option<Joint>,
    pub children: Vec<String>,
}

/// Links of a robot connected by joints, rooted at exactly one link.
///
/// Every link other than the root has exactly one parent joint, so the
/// structure is a tree. Segments can only be attached to links already in the
/// tree which rules out loops by construction.
#[derive(Debug, Clone)]
pub struct KinematicTree {
    root: String,
    segments: BTreeMap<String, Segment>,
}

impl KinematicTree {
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut segments = BTreeMap::new();
        segments.insert(
            root.clone(),
            Segment {
                link: root.clone(),
                parent: None,
                joint: None,
                children: Vec::new(),
            },
        );
        Self { root, segments }
    }

    /// Attach `link` below `parent` through `joint`.
    pub fn add_segment(
        &mut self,
        parent: &str,
        link: impl Into<String>,
        joint: Joint,
    ) -> Result<(), TfError> {
        let link = link.into();
        if self.segments.contains_key(&link) {
            return Err(TfError::DuplicateLink(link));
        }
        let Some(parent_segment) = self.segments.get_mut(parent) else {
            return Err(TfError::UnknownLink(parent.to_string(), joint.name));
        };
        parent_segment.children.push(link.clone());

        self.segments.insert(
            link.clone(),
            Segment {
                link,
                parent: Some(parent.to_string()),
                joint: Some(joint),
                children: Vec::new(),
            },
        );
        Ok(())
    }

    pub fn from_urdf(robot: &urdf_rs::Robot) -> Result<Self, TfError> {
        let mut links = BTreeSet::new();
        for link in &robot.links {
            if !links.insert(link.name.as_str()) {
                return Err(TfError::DuplicateLink(link.name.clone()));
            }
        }

        // child link -> joint, and parent link -> joints in description order
        let mut parent_joint = HashMap::new();
        let mut child_joints: HashMap<&str, Vec<&urdf_rs::Joint>> = HashMap::new();
        for joint in &robot.joints {
            for link in [&joint.parent.link, &joint.child.link] {
                if !links.contains(link.as_str()) {
                    return Err(TfError::UnknownLink(link.clone(), joint.name.clone()));
                }
            }
            if parent_joint
                .insert(joint.child.link.as_str(), joint)
                .is_some()
            {
                return Err(TfError::DuplicateLink(joint.child.link.clone()));
            }
            child_joints
                .entry(joint.parent.link.as_str())
                .or_default()
                .push(joint);
        }

        let roots = links
            .iter()
            .filter(|link| !parent_joint.contains_key(*link))
            .map(|link| link.to_string())
            .collect::<Vec<_>>();
        let root = match roots.as_slice() {
            [] => return Err(TfError::NoRoot),
            [root] => root.clone(),
            _ => return Err(TfError::MultipleRoots(roots)),
        };

        // breadth first so every parent is in the tree before its children
        let mut tree = Self::new(root.clone());
        let mut queue = VecDeque::from([root.as_str()]);
        while let Some(parent) = queue.pop_front() {
            for joint in child_joints.get(parent).into_iter().flatten() {
                tree.add_segment(parent, joint.child.link.clone(), Joint::from(*joint))?;
                queue.push_back(joint.child.link.as_str());
            }
        }

        if tree.num_links() != links.len() {
            let unreachable = links
                .iter()
                .filter(|link| !tree.segments.contains_key(**link))
                .map(|link| link.to_string())
                .collect();
            return Err(TfError::LoopDetected(root, unreachable));
        }

        log::debug!(
            "loaded robot '{}' with {} links rooted at '{}'",
            robot.name,
            tree.num_links(),
            tree.root
        );
        Ok(tree)
    }

    pub fn from_urdf_str(xml: &str) -> Result<Self, TfError> {
        let robot = urdf_rs::read_from_string(xml).map_err(|err| TfError::Urdf(err.to_string()))?;
        Self::from_urdf(&robot)
    }

    pub fn from_urdf_file(path: impl AsRef<Path>) -> Result<Self, TfError> {
        let robot = urdf_rs::read_file(path).map_err(|err| TfError::Urdf(err.to_string()))?;
        Self::from_urdf(&robot)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn segment(&self, link: &str) -> Option<&Segment> {
        self.segments.get(link)
    }

    pub fn parent(&self, link: &str) -> Option<&str> {
        self.segments.get(link)?.parent.as_deref()
    }

    /// Children of `link`, empty if the link is unknown.
    pub fn children(&self, link: &str) -> &[String] {
        self.segments
            .get(link)
            .map(|segment| segment.children.as_slice())
            .unwrap_or_default()
    }

    /// All link names in sorted order, root included.
    pub fn links(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.keys().map(String::as_str)
    }

    pub fn num_links(&self) -> usize {
        self.segments.len()
    }

    /// Names of the joints that take a position value, sorted.
    pub fn joint_names(&self) -> Vec<&str> {
        let mut names = self
            .segments
            .values()
            .filter_map(|segment| segment.joint.as_ref())
            .filter(|joint| joint.is_movable())
            .map(|joint| joint.name.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, link: &str, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.segments.get(link).and_then(|s| s.joint.as_ref()) {
            Some(joint) => writeln!(
                f,
                "{indent}{link} <- {} ({:?})",
                joint.name, joint.joint_type
            )?,
            None => writeln!(f, "{indent}{link}")?,
        }
        for child in self.children(link) {
            self.fmt_subtree(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for KinematicTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_subtree(f, &self.root, 0)
    }
}

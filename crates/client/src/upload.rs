//! Upload payload construction from a native object

use plm_model::PartCreationRequest;

use crate::error::{PlmError, Result};
use crate::host::{CadHost, ObjectRef};

/// Build the upload request for `obj`.
///
/// The previously confirmed id is the object's own tag. An untagged object is
/// new even inside a document loaded from the catalog. Geometry export
/// failures are reported, never turned into an empty blob.
pub fn build_request<H: CadHost + ?Sized>(host: &H, obj: &ObjectRef, author: &str) -> Result<PartCreationRequest> {
    let native = host.read_object(obj)?;

    let brep = host.export_geometry(obj).map_err(|e| PlmError::GeometryExport {
        label: native.label.clone(),
        reason: e.to_string(),
    })?;
    if brep.trim().is_empty() {
        return Err(PlmError::GeometryExport {
            label: native.label,
            reason: "host returned empty geometry".to_string(),
        });
    }

    Ok(PartCreationRequest::new(native.label, brep, native.placement.into())
        .with_id(native.tag)
        .with_author(author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::BREP_SAMPLE;
    use crate::host::Placement;
    use crate::MemoryHost;

    #[test]
    fn test_request_carries_placement_and_tag() {
        let mut host = MemoryHost::new();
        let doc = host.new_document("d").unwrap();
        let placement = Placement {
            position: [5.0, 6.0, 7.0],
            angle: 15.0,
            axis: [0.0, 0.0, 1.0],
        };
        let obj = host.add_object(&doc, "flange", BREP_SAMPLE, placement).unwrap();
        host.set_object_tag(&obj, "abc").unwrap();

        let req = build_request(&host, &obj, "kim").unwrap();
        assert_eq!(req.id.as_deref(), Some("abc"));
        assert_eq!(req.name, "flange");
        assert_eq!(req.author, "kim");
        assert_eq!(req.coordinates.z, 7.0);
        assert_eq!(req.coordinates.axis.z, 1.0);
        assert_eq!(req.brep_files.brep_string.as_deref(), Some(BREP_SAMPLE));
    }

    #[test]
    fn test_untagged_object_in_tagged_document_has_no_id() {
        let mut host = MemoryHost::new();
        let doc = host.new_document("d").unwrap();
        host.set_document_tag(&doc, "from-doc").unwrap();
        let obj = host.add_object(&doc, "x", BREP_SAMPLE, Placement::default()).unwrap();

        let req = build_request(&host, &obj, "").unwrap();
        assert!(req.id.is_none());
    }

    #[test]
    fn test_export_failure_is_reported() {
        let mut host = MemoryHost::new();
        let doc = host.new_document("d").unwrap();
        let obj = host.add_object(&doc, "broken", "not a shape", Placement::default()).unwrap();

        let err = build_request(&host, &obj, "").unwrap_err();
        assert!(matches!(err, PlmError::GeometryExport { ref label, .. } if label == "broken"));
    }
}
